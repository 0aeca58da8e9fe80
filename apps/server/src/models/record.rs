use chrono::{DateTime, Utc};
use halo_identifiers::IdentityNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A medical record joined with its patient and creator.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub identity_number: String,
    pub symptoms: String,
    pub medications: String,
    pub created_at: DateTime<Utc>,
    pub phone_number: String,
    pub patient_name: String,
    pub birthdate: DateTime<Utc>,
    pub gender: String,
    pub identity_card_image_url: String,
    pub user_id: Uuid,
    pub employee_id: i64,
    pub creator_name: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub identity_number: u64,
    #[validate(length(min = 1, max = 2000))]
    pub symptoms: String,
    #[validate(length(min = 1, max = 2000))]
    pub medications: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatientDetail {
    pub identity_number: u64,
    pub phone_number: String,
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub gender: String,
    pub identity_card_scan_img: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCreatorDetail {
    pub nip: i64,
    pub name: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub symptoms: String,
    pub medications: String,
    pub created_at: DateTime<Utc>,
    pub identity_detail: RecordPatientDetail,
    pub created_by: RecordCreatorDetail,
}

impl TryFrom<MedicalRecord> for RecordResponse {
    type Error = halo_identifiers::Error;

    fn try_from(record: MedicalRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            symptoms: record.symptoms,
            medications: record.medications,
            created_at: record.created_at,
            identity_detail: RecordPatientDetail {
                identity_number: IdentityNumber::parse(&record.identity_number)?.as_u64(),
                phone_number: record.phone_number,
                name: record.patient_name,
                birth_date: record.birthdate,
                gender: record.gender,
                identity_card_scan_img: record.identity_card_image_url,
            },
            created_by: RecordCreatorDetail {
                nip: record.employee_id,
                name: record.creator_name,
                user_id: record.user_id,
            },
        })
    }
}

/// `GET /v1/medical/record` query string.
#[derive(Debug, Default, Deserialize)]
pub struct RecordSearchQuery {
    #[serde(rename = "identityDetail.identityNumber")]
    pub identity_number: Option<String>,
    #[serde(rename = "createdBy.userId")]
    pub created_by_user_id: Option<String>,
    #[serde(rename = "createdBy.nip")]
    pub created_by_nip: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
