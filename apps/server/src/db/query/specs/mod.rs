//! [`SearchSpec`](super::SearchSpec) implementations for the list endpoints.
//!
//! Filters are added in a fixed order per entity. Empty or unusable values
//! are dropped rather than rejected.

mod patient;
mod record;
mod user;

use halo_identifiers::{Role, StaffId};
use uuid::Uuid;

use super::{widen_prefix, Clause, PrefixRange};

/// Trimmed, non-empty query value.
fn active(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Exact id match. A value that is not a UUID is compared as text so it
/// simply finds nothing instead of failing the whole query.
fn id_clause(column: &'static str, column_as_text: &'static str, raw: &str) -> Clause {
    match Uuid::parse_str(raw) {
        Ok(id) => Clause::eq_uuid(column, id),
        Err(_) => Clause::eq_text(column_as_text, raw),
    }
}

/// Employee-id prefix filter over `column`.
///
/// A known role tag wins over a numeric prefix. A zero or non-numeric prefix
/// is ignored. A prefix longer than an employee id still filters, to an
/// empty range.
fn employee_id_clauses(
    column: &'static str,
    role: Option<&str>,
    nip_prefix: Option<&str>,
) -> Vec<Clause> {
    let prefix = match (role.and_then(Role::from_tag), nip_prefix) {
        (Some(role), _) => role.prefix().to_string(),
        (None, Some(raw)) if is_nonzero_digits(raw) => raw.to_string(),
        (None, _) => return Vec::new(),
    };

    let range = if prefix.len() > StaffId::DIGITS {
        Some(PrefixRange::EMPTY)
    } else {
        widen_prefix(&prefix, StaffId::DIGITS)
    };
    range
        .and_then(|range| range.into_clauses(column))
        .map(Vec::from)
        .unwrap_or_default()
}

fn is_nonzero_digits(raw: &str) -> bool {
    raw.bytes().all(|b| b.is_ascii_digit()) && raw.bytes().any(|b| b != b'0')
}
