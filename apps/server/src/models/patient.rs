use chrono::{DateTime, Utc};
use halo_identifiers::IdentityNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientGender {
    Male,
    Female,
}

impl PatientGender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// A row of `patients`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Patient {
    pub identity_number: String,
    pub user_id: Uuid,
    pub phone_number: String,
    pub name: String,
    pub birthdate: DateTime<Utc>,
    pub gender: String,
    pub identity_card_image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub identity_number: u64,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(length(min = 3, max = 30))]
    pub name: String,
    #[serde(alias = "birthdate")]
    pub birth_date: DateTime<Utc>,
    pub gender: PatientGender,
    #[validate(url)]
    pub identity_card_scan_img: String,
}

pub const PHONE_PREFIX: &str = "+62";

/// `+62` followed by digits, 10 to 15 characters in total.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let digits = phone
        .strip_prefix(PHONE_PREFIX)
        .ok_or_else(|| ValidationError::new("phone_prefix"))?;
    if !(10..=15).contains(&phone.len()) {
        return Err(ValidationError::new("phone_length"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::new("phone_digits"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientResponse {
    pub identity_number: u64,
    pub phone_number: String,
    pub name: String,
    pub birth_date: DateTime<Utc>,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Patient> for PatientResponse {
    type Error = halo_identifiers::Error;

    fn try_from(patient: Patient) -> Result<Self, Self::Error> {
        Ok(Self {
            identity_number: IdentityNumber::parse(&patient.identity_number)?.as_u64(),
            phone_number: patient.phone_number,
            name: patient.name,
            birth_date: patient.birthdate,
            gender: patient.gender,
            created_at: patient.created_at,
        })
    }
}

/// `GET /v1/medical/patient` query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSearchQuery {
    pub identity_number: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
