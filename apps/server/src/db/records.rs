//! Medical records.

use halo_identifiers::IdentityNumber;
use sqlx::PgPool;
use uuid::Uuid;

use super::execute::bind_all;
use super::query::{QueryComposer, SoftDelete};
use crate::models::{MedicalRecord, RecordSearchQuery};
use crate::{Error, Result};

/// Records joined with patient and creator. Wrapped in a derived table so
/// filters and the soft-delete predicate can use unqualified column names.
const SELECT_RECORDS: &str = "select * from (\
     select r.id, r.identity_number, r.symptoms, r.medications, r.created_at, r.deleted_at, \
     p.phone_number, p.name as patient_name, p.birthdate, p.gender, p.identity_card_image_url, \
     r.user_id, u.employee_id, u.name as creator_name \
     from records r \
     join patients p on p.identity_number = r.identity_number \
     join users u on u.id = r.user_id\
     ) as medical_records";

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub identity_number: IdentityNumber,
    pub created_by: Uuid,
    pub symptoms: String,
    pub medications: String,
}

#[derive(Clone)]
pub struct RecordRepository {
    pool: PgPool,
}

impl RecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fails with `NotFound` when the patient does not exist.
    pub async fn insert(&self, record: NewRecord) -> Result<Uuid> {
        let (id,): (Uuid,) = sqlx::query_as(
            "insert into records (id, identity_number, user_id, symptoms, medications) \
             values ($1, $2, $3, $4, $5) returning id",
        )
        .bind(Uuid::new_v4())
        .bind(record.identity_number.as_str())
        .bind(record.created_by)
        .bind(record.symptoms)
        .bind(record.medications)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, "patient"))?;
        Ok(id)
    }

    pub async fn search(&self, search: &RecordSearchQuery) -> Result<Vec<MedicalRecord>> {
        let query = QueryComposer::search(SELECT_RECORDS, search, SoftDelete::Exclude).build();
        let records = bind_all(&query).fetch_all(&self.pool).await?;
        crate::metrics::record_search("record", records.len());
        Ok(records)
    }
}
