//! Shared application state handed to every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::Config;
use crate::db::{self, PatientRepository, RecordRepository, UserRepository};
use crate::services::{PatientService, RecordService, StaffService};
use crate::Result;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,
    pub tokens: Arc<TokenService>,
    pub staff: Arc<StaffService>,
    pub patients: Arc<PatientService>,
    pub records: Arc<RecordService>,
}

impl AppState {
    /// Connect to the database, run migrations when enabled and wire services.
    pub async fn new(config: Config) -> Result<Self> {
        let pool = db::connect(&config.database).await?;
        if config.database.run_migrations {
            db::migrate(&pool).await?;
        }
        Ok(Self::with_pool(config, pool))
    }

    /// Wire services over an existing pool.
    pub fn with_pool(config: Config, pool: PgPool) -> Self {
        let tokens = Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_hours,
        ));

        let staff = StaffService::new(
            UserRepository::new(pool.clone()),
            tokens.clone(),
            config.auth.bcrypt_cost,
        );
        let patients = PatientService::new(PatientRepository::new(pool.clone()));
        let records = RecordService::new(RecordRepository::new(pool.clone()));

        Self {
            config: Arc::new(config),
            db_pool: pool,
            tokens,
            staff: Arc::new(staff),
            patients: Arc::new(patients),
            records: Arc::new(records),
        }
    }
}
