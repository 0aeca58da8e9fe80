use validator::Validate;

use super::decode_identity_number;
use crate::auth::Principal;
use crate::db::{NewPatient, PatientRepository};
use crate::models::{CreatePatientRequest, PatientResponse, PatientSearchQuery};
use crate::Result;

pub struct PatientService {
    patients: PatientRepository,
}

impl PatientService {
    pub fn new(patients: PatientRepository) -> Self {
        Self { patients }
    }

    #[tracing::instrument(skip_all, fields(created_by = %principal.user_id))]
    pub async fn register(
        &self,
        principal: &Principal,
        request: CreatePatientRequest,
    ) -> Result<PatientResponse> {
        request.validate()?;
        let identity_number = decode_identity_number(request.identity_number)?;

        let patient = self
            .patients
            .insert(NewPatient {
                identity_number,
                created_by: principal.user_id,
                phone_number: request.phone_number,
                name: request.name,
                birthdate: request.birth_date,
                gender: request.gender,
                identity_card_image_url: request.identity_card_scan_img,
            })
            .await?;

        Ok(PatientResponse::try_from(patient)?)
    }

    pub async fn search(&self, search: &PatientSearchQuery) -> Result<Vec<PatientResponse>> {
        let patients = self.patients.search(search).await?;
        Ok(patients
            .into_iter()
            .map(PatientResponse::try_from)
            .collect::<std::result::Result<_, _>>()?)
    }
}
