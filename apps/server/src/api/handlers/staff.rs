//! Staff accounts: IT self-registration, logins and nurse management.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use halo_identifiers::Role;

use crate::api::extractors::{JsonBody, QueryParams, UserIdPath};
use crate::auth::AuthenticatedPrincipal;
use crate::models::{
    ApiResponse, GrantAccessRequest, ItRegisterRequest, LoginRequest, NurseRegisterRequest,
    NurseUpdateRequest, UserSearchQuery,
};
use crate::state::AppState;
use crate::Result;

pub async fn register_it(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ItRegisterRequest>,
) -> Result<impl IntoResponse> {
    let data = state.staff.register_it(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

pub async fn login_it(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse> {
    let data = state.staff.login(Role::It, request).await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn login_nurse(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse> {
    let data = state.staff.login(Role::Nurse, request).await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn register_nurse(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    JsonBody(request): JsonBody<NurseRegisterRequest>,
) -> Result<impl IntoResponse> {
    let data = state.staff.register_nurse(&principal, request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

pub async fn update_nurse(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    UserIdPath(user_id): UserIdPath,
    JsonBody(request): JsonBody<NurseUpdateRequest>,
) -> Result<impl IntoResponse> {
    let data = state
        .staff
        .update_nurse(&principal, user_id, request)
        .await?;
    Ok(Json(ApiResponse::success(data)))
}

pub async fn delete_nurse(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    UserIdPath(user_id): UserIdPath,
) -> Result<impl IntoResponse> {
    state.staff.delete_nurse(&principal, user_id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn grant_access(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    UserIdPath(user_id): UserIdPath,
    JsonBody(request): JsonBody<GrantAccessRequest>,
) -> Result<impl IntoResponse> {
    state
        .staff
        .grant_access(&principal, user_id, request)
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn search_users(
    State(state): State<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    QueryParams(query): QueryParams<UserSearchQuery>,
) -> Result<impl IntoResponse> {
    let data = state.staff.search(&principal, &query).await?;
    Ok(Json(ApiResponse::success(data)))
}
