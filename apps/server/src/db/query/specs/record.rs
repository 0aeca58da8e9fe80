use crate::db::query::{Clause, OrderTerm, Pagination, SearchSpec};
use crate::models::RecordSearchQuery;

use super::{active, employee_id_clauses, id_clause};

impl SearchSpec for RecordSearchQuery {
    fn where_clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(4);
        if let Some(identity_number) = active(&self.identity_number) {
            clauses.push(Clause::eq_text("identity_number", identity_number));
        }
        if let Some(user_id) = active(&self.created_by_user_id) {
            clauses.push(id_clause("user_id", "user_id::text", user_id));
        }
        clauses.extend(employee_id_clauses(
            "employee_id",
            None,
            active(&self.created_by_nip),
        ));
        clauses
    }

    fn pagination(&self) -> Pagination {
        Pagination::from_raw(self.limit.as_deref(), self.offset.as_deref())
    }

    fn order_by(&self) -> Vec<OrderTerm> {
        vec![OrderTerm::created_at(self.created_at.as_deref())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::query::BindValue;

    #[test]
    fn creator_nip_is_widened() {
        let search = RecordSearchQuery {
            identity_number: Some("3271012345678901".into()),
            created_by_nip: Some("303".into()),
            ..Default::default()
        };
        let clauses = search.where_clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].column(), "identity_number");
        assert_eq!(clauses[1].value(), &BindValue::BigInt(3_030_000_000_000));
        assert_eq!(clauses[2].value(), &BindValue::BigInt(3_039_999_999_999));
    }

    #[test]
    fn dotted_query_keys_deserialize() {
        let search: RecordSearchQuery = serde_json::from_value(serde_json::json!({
            "identityDetail.identityNumber": "3271012345678901",
            "createdBy.nip": "615",
            "createdAt": "asc",
        }))
        .unwrap();
        assert_eq!(search.created_by_nip.as_deref(), Some("615"));
        assert_eq!(search.order_by()[0].to_string(), "created_at asc");
    }
}
