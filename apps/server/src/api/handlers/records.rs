use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api::extractors::{JsonBody, QueryParams};
use crate::auth::AuthenticatedPrincipal;
use crate::models::{ApiResponse, CreateRecordRequest, RecordSearchQuery};
use crate::state::AppState;
use crate::Result;

pub async fn create_record(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    JsonBody(request): JsonBody<CreateRecordRequest>,
) -> Result<impl IntoResponse> {
    let id = state.records.create(&principal, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(json!({ "id": id }))),
    ))
}

pub async fn search_records(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<RecordSearchQuery>,
) -> Result<impl IntoResponse> {
    let data = state.records.search(&query).await?;
    Ok(Json(ApiResponse::success(data)))
}
