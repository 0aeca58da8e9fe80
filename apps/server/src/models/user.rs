use chrono::{DateTime, Utc};
use halo_identifiers::{Role, StaffId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A row of `users`. `password` is `None` until access is granted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub employee_id: i64,
    pub name: String,
    pub password: Option<String>,
    pub identity_card_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn staff_id(&self) -> Option<StaffId> {
        let raw = u64::try_from(self.employee_id).ok()?;
        StaffId::from_u64(raw).ok()
    }

    pub fn role(&self) -> Option<Role> {
        self.staff_id().map(|id| id.role())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItRegisterRequest {
    pub nip: u64,
    #[validate(length(min = 5, max = 50))]
    pub name: String,
    #[validate(length(min = 5, max = 33))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub nip: u64,
    #[validate(length(min = 5, max = 33))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NurseRegisterRequest {
    pub nip: u64,
    #[validate(length(min = 5, max = 50))]
    pub name: String,
    #[validate(url)]
    pub identity_card_scan_img: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NurseUpdateRequest {
    pub nip: u64,
    #[validate(length(min = 5, max = 50))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GrantAccessRequest {
    #[validate(length(min = 5, max = 33))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: Uuid,
    pub nip: i64,
    pub name: String,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseResponse {
    pub user_id: Uuid,
    pub nip: i64,
    pub name: String,
}

impl From<User> for NurseResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            nip: user.employee_id,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: Uuid,
    pub nip: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            nip: user.employee_id,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// `GET /v1/user` query string. Values stay raw; normalization happens when
/// the query is turned into clauses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchQuery {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub nip: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
