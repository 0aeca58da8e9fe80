use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use super::query::{BindValue, ParameterizedQuery};

/// Prepare a composed query with its binds applied in placeholder order.
pub(super) fn bind_all<'q, T>(query: &'q ParameterizedQuery) -> QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %query.sql, binds = query.binds.len(), "Composed query");

    let mut prepared = sqlx::query_as::<_, T>(&query.sql);
    for value in &query.binds {
        prepared = match value {
            BindValue::Text(v) => prepared.bind(v.as_str()),
            BindValue::BigInt(v) => prepared.bind(*v),
            BindValue::Uuid(v) => prepared.bind(*v),
        };
    }
    prepared
}
