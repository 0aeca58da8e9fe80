//! Request bodies, query strings, rows and response shapes.

pub mod patient;
pub mod record;
pub mod user;

use serde::Serialize;

pub use patient::{CreatePatientRequest, Patient, PatientGender, PatientResponse, PatientSearchQuery};
pub use record::{
    CreateRecordRequest, MedicalRecord, RecordCreatorDetail, RecordPatientDetail, RecordResponse,
    RecordSearchQuery,
};
pub use user::{
    AuthResponse, GrantAccessRequest, ItRegisterRequest, LoginRequest, NurseRegisterRequest,
    NurseResponse, NurseUpdateRequest, User, UserSearchQuery, UserSummary,
};

/// Success envelope: `{"message": "success", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: "success",
            data,
        }
    }
}
