//! Database layer - pool, migrations, repositories and query composition

mod execute;
pub mod patients;
pub mod query;
pub mod records;
pub mod users;

pub use patients::{NewPatient, PatientRepository};
pub use records::{NewRecord, RecordRepository};
pub use users::{NewUser, UserRepository};

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::{Error, Result};

/// Open the connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = pool_options(config).connect(&config.url).await?;
    tracing::info!(
        max_connections = config.pool_max_size,
        "Database pool ready"
    );
    Ok(pool)
}

/// Build a pool that connects on first use.
pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool> {
    Ok(pool_options(config).connect_lazy(&config.url)?)
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(config.pool_min_size)
        .max_connections(config.pool_max_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
}

/// Apply pending migrations from `apps/server/migrations`.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Internal(format!("migration failed: {e}")))?;
    tracing::info!("Database migrations applied");
    Ok(())
}
