use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::api::extractors::{JsonBody, QueryParams};
use crate::auth::AuthenticatedPrincipal;
use crate::models::{ApiResponse, CreatePatientRequest, PatientSearchQuery};
use crate::state::AppState;
use crate::Result;

pub async fn register_patient(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    JsonBody(request): JsonBody<CreatePatientRequest>,
) -> Result<impl IntoResponse> {
    let data = state.patients.register(&principal, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

pub async fn search_patients(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PatientSearchQuery>,
) -> Result<impl IntoResponse> {
    let data = state.patients.search(&query).await?;
    Ok(Json(ApiResponse::success(data)))
}
