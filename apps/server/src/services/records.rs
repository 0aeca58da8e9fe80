use uuid::Uuid;
use validator::Validate;

use super::decode_identity_number;
use crate::auth::Principal;
use crate::db::{NewRecord, RecordRepository};
use crate::models::{CreateRecordRequest, RecordResponse, RecordSearchQuery};
use crate::Result;

pub struct RecordService {
    records: RecordRepository,
}

impl RecordService {
    pub fn new(records: RecordRepository) -> Self {
        Self { records }
    }

    #[tracing::instrument(skip_all, fields(created_by = %principal.user_id))]
    pub async fn create(&self, principal: &Principal, request: CreateRecordRequest) -> Result<Uuid> {
        request.validate()?;
        let identity_number = decode_identity_number(request.identity_number)?;

        let id = self
            .records
            .insert(NewRecord {
                identity_number,
                created_by: principal.user_id,
                symptoms: request.symptoms,
                medications: request.medications,
            })
            .await?;

        tracing::info!(record_id = %id, "Medical record created");
        Ok(id)
    }

    pub async fn search(&self, search: &RecordSearchQuery) -> Result<Vec<RecordResponse>> {
        let records = self.records.search(search).await?;
        Ok(records
            .into_iter()
            .map(RecordResponse::try_from)
            .collect::<std::result::Result<_, _>>()?)
    }
}
