//! Staff accounts.

use halo_identifiers::StaffId;
use sqlx::PgPool;
use uuid::Uuid;

use super::execute::bind_all;
use super::query::{BindValue, Clause, Comparison, QueryComposer, SoftDelete};
use crate::models::{User, UserSearchQuery};
use crate::{Error, Result};

const SELECT_USERS: &str =
    "select id, employee_id, name, password, identity_card_image_url, created_at from users";

#[derive(Debug, Clone)]
pub struct NewUser {
    pub nip: StaffId,
    pub name: String,
    pub password_hash: Option<String>,
    pub identity_card_image_url: Option<String>,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_nip(&self, nip: StaffId) -> Result<Option<User>> {
        let query = QueryComposer::new(SELECT_USERS)
            .filter([Clause::new(
                "employee_id",
                Comparison::Eq,
                BindValue::BigInt(nip.as_i64()),
            )])
            .soft_delete(SoftDelete::Exclude)
            .build();
        Ok(bind_all(&query).fetch_optional(&self.pool).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = QueryComposer::new(SELECT_USERS)
            .filter([Clause::eq_uuid("id", id)])
            .soft_delete(SoftDelete::Exclude)
            .build();
        Ok(bind_all(&query).fetch_optional(&self.pool).await?)
    }

    pub async fn insert(&self, user: NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            "insert into users (id, employee_id, name, password, identity_card_image_url) \
             values ($1, $2, $3, $4, $5) \
             returning id, employee_id, name, password, identity_card_image_url, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user.nip.as_i64())
        .bind(user.name)
        .bind(user.password_hash)
        .bind(user.identity_card_image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, "user"))
    }

    pub async fn update_identity(&self, id: Uuid, nip: StaffId, name: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(
            "update users set employee_id = $2, name = $3, updated_at = now() \
             where id = $1 and deleted_at is null \
             returning id, employee_id, name, password, identity_card_image_url, created_at",
        )
        .bind(id)
        .bind(nip.as_i64())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::from_write(e, "user"))
    }

    /// Returns `false` when no live row matched.
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "update users set deleted_at = now(), updated_at = now() \
             where id = $1 and deleted_at is null",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            "update users set password = $2, updated_at = now() \
             where id = $1 and deleted_at is null",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn search(&self, search: &UserSearchQuery) -> Result<Vec<User>> {
        let query = QueryComposer::search(SELECT_USERS, search, SoftDelete::Exclude).build();
        let users = bind_all(&query).fetch_all(&self.pool).await?;
        crate::metrics::record_search("user", users.len());
        Ok(users)
    }
}
