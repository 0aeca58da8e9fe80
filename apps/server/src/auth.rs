//! Authentication / Authorization primitives.
//!
//! Staff log in with their employee id and password and receive an HS256
//! access token. Protected routes run [`auth_middleware`], which turns the
//! bearer token into a [`Principal`] carried in request extensions.

use axum::{
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use halo_identifiers::{Role, StaffId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::{state::AppState, Error, Result};

/// The authenticated staff member behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub nip: StaffId,
}

impl Principal {
    pub fn role(&self) -> Role {
        self.nip.role()
    }

    pub fn require_role(&self, role: Role) -> Result<()> {
        if self.role() == role {
            Ok(())
        } else {
            Err(Error::Unauthorized(format!(
                "this action requires the {role} role"
            )))
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),
    #[error("Authentication misconfigured: {0}")]
    Misconfigured(String),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingToken => "Missing bearer token".to_string(),
            Self::InvalidToken(msg) => format!("Invalid bearer token: {msg}"),
            Self::Misconfigured(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let Self::Misconfigured(detail) = &self {
            tracing::error!(error = %detail, "Authentication misconfigured");
        }

        let mut response =
            (self.status(), axum::Json(json!({ "message": self.message() }))).into_response();
        if self.status() == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    nip: u64,
    iat: i64,
    exp: i64,
}

const MAX_TOKEN_TTL_HOURS: u64 = 24 * 365;

/// Issues and verifies access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        let hours = ttl_hours.min(MAX_TOKEN_TTL_HOURS) as i64;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: chrono::Duration::hours(hours),
        }
    }

    pub fn issue(&self, user_id: Uuid, nip: StaffId) -> std::result::Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            nip: nip.as_u64(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Misconfigured(format!("Failed to sign token: {e}")))
    }

    /// Verify signature and expiry, then decode the embedded employee id.
    pub fn verify(&self, token: &str) -> std::result::Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let nip = StaffId::from_u64(data.claims.nip)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        Ok(Principal {
            user_id: data.claims.sub,
            nip,
        })
    }

    pub fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> std::result::Result<Principal, AuthError> {
        let authz = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?;

        let authz = authz.to_str().map_err(|_| {
            AuthError::InvalidToken("Authorization header is not valid UTF-8".to_string())
        })?;

        let token = authz
            .strip_prefix("Bearer ")
            .or_else(|| authz.strip_prefix("bearer "))
            .ok_or_else(|| {
                AuthError::InvalidToken("Authorization header must be 'Bearer <token>'".to_string())
            })?;

        self.verify(token.trim())
    }
}

/// Hash a password with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| Error::Internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| Error::Internal(format!("password hashing failed: {e}")))
}

/// Check a password against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| Error::Internal(format!("password verification task failed: {e}")))?
        .map_err(|e| Error::Internal(format!("password verification failed: {e}")))
}

/// Extractor for the authenticated principal attached by middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedPrincipal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthenticatedPrincipal)
            .ok_or_else(|| AuthError::MissingToken.into_response())
    }
}

/// Middleware for attaching `Principal` (or rejecting) on protected routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Response {
    if req.method() == axum::http::Method::OPTIONS {
        return next.run(req).await;
    }

    match state.tokens.authenticate_headers(req.headers()) {
        Ok(principal) => {
            tracing::debug!(user_id = %principal.user_id, role = %principal.role(), "Authenticated");
            req.extensions_mut().insert::<Principal>(principal);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "Rejected request without valid token");
            err.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nurse() -> StaffId {
        StaffId::decode("3031202401123").unwrap()
    }

    #[test]
    fn issued_token_round_trips_to_principal() {
        let tokens = TokenService::new("secret", 72);
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id, nurse()).unwrap();
        let principal = tokens.verify(&token).unwrap();
        assert_eq!(principal.user_id, user_id);
        assert_eq!(principal.role(), Role::Nurse);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenService::new("secret", 72)
            .issue(Uuid::new_v4(), nurse())
            .unwrap();
        let err = TokenService::new("other", 72).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn role_check_uses_nip_prefix() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            nip: nurse(),
        };
        assert!(principal.require_role(Role::Nurse).is_ok());
        assert!(matches!(
            principal.require_role(Role::It),
            Err(Error::Unauthorized(_))
        ));
    }

    #[test]
    fn header_must_be_bearer() {
        let tokens = TokenService::new("secret", 72);
        let mut headers = HeaderMap::new();
        assert!(matches!(
            tokens.authenticate_headers(&headers),
            Err(AuthError::MissingToken)
        ));
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(matches!(
            tokens.authenticate_headers(&headers),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn password_hash_verifies() {
        let hash = hash_password("hunter22".into(), 4).await.unwrap();
        assert!(verify_password("hunter22".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".into(), hash).await.unwrap());
    }
}
