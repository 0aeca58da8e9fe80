//! Patients.

use chrono::{DateTime, Utc};
use halo_identifiers::IdentityNumber;
use sqlx::PgPool;
use uuid::Uuid;

use super::execute::bind_all;
use super::query::{QueryComposer, SoftDelete};
use crate::models::{Patient, PatientGender, PatientSearchQuery};
use crate::{Error, Result};

const SELECT_PATIENTS: &str = "select identity_number, user_id, phone_number, name, birthdate, \
     gender, identity_card_image_url, created_at from patients";

#[derive(Debug, Clone)]
pub struct NewPatient {
    pub identity_number: IdentityNumber,
    pub created_by: Uuid,
    pub phone_number: String,
    pub name: String,
    pub birthdate: DateTime<Utc>,
    pub gender: PatientGender,
    pub identity_card_image_url: String,
}

#[derive(Clone)]
pub struct PatientRepository {
    pool: PgPool,
}

impl PatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, patient: NewPatient) -> Result<Patient> {
        sqlx::query_as::<_, Patient>(
            "insert into patients \
             (identity_number, user_id, phone_number, name, birthdate, gender, identity_card_image_url) \
             values ($1, $2, $3, $4, $5, $6, $7) \
             returning identity_number, user_id, phone_number, name, birthdate, gender, \
             identity_card_image_url, created_at",
        )
        .bind(patient.identity_number.as_str())
        .bind(patient.created_by)
        .bind(patient.phone_number)
        .bind(patient.name)
        .bind(patient.birthdate)
        .bind(patient.gender.as_str())
        .bind(patient.identity_card_image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, "patient"))
    }

    pub async fn search(&self, search: &PatientSearchQuery) -> Result<Vec<Patient>> {
        let query = QueryComposer::search(SELECT_PATIENTS, search, SoftDelete::Exclude).build();
        let patients = bind_all(&query).fetch_all(&self.pool).await?;
        crate::metrics::record_search("patient", patients.len());
        Ok(patients)
    }
}
