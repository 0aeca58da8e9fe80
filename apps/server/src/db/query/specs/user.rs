use crate::db::query::{Clause, OrderTerm, Pagination, SearchSpec};
use crate::models::UserSearchQuery;

use super::{active, employee_id_clauses, id_clause};

impl SearchSpec for UserSearchQuery {
    fn where_clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(4);
        if let Some(user_id) = active(&self.user_id) {
            clauses.push(id_clause("id", "id::text", user_id));
        }
        if let Some(name) = active(&self.name) {
            clauses.push(Clause::contains("name", name));
        }
        clauses.extend(employee_id_clauses(
            "employee_id",
            active(&self.role),
            active(&self.nip),
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
    use crate::db::query::{BindValue, QueryComposer, SoftDelete};
    use proptest::prelude::*;

    const BASE: &str = "select id, employee_id, name from users";

    #[test]
    fn empty_query_only_paginates() {
        let query = QueryComposer::search(BASE, &UserSearchQuery::default(), SoftDelete::Exclude)
            .build();
        assert_eq!(
            query.sql,
            "select id, employee_id, name from users where deleted_at is null \
             order by created_at desc limit $1 offset $2"
        );
        assert_eq!(query.binds, vec![BindValue::BigInt(5), BindValue::BigInt(0)]);
    }

    #[test]
    fn name_and_role_filters_in_stable_order() {
        let search = UserSearchQuery {
            name: Some("  ann ".into()),
            role: Some("it".into()),
            created_at: Some("asc".into()),
            limit: Some("10".into()),
            ..Default::default()
        };
        let query = QueryComposer::search(BASE, &search, SoftDelete::Exclude).build();
        assert_eq!(
            query.sql,
            "select id, employee_id, name from users where name ilike $1 \
             and employee_id >= $2 and employee_id <= $3 and deleted_at is null \
             order by created_at asc limit $4 offset $5"
        );
        assert_eq!(
            query.binds,
            vec![
                BindValue::Text("%ann%".into()),
                BindValue::BigInt(6_150_000_000_000),
                BindValue::BigInt(6_159_999_999_999),
                BindValue::BigInt(10),
                BindValue::BigInt(0),
            ]
        );
    }

    #[test]
    fn user_id_binds_as_uuid() {
        let id = uuid::Uuid::new_v4();
        let search = UserSearchQuery {
            user_id: Some(id.to_string()),
            ..Default::default()
        };
        assert_eq!(search.where_clauses(), vec![Clause::eq_uuid("id", id)]);
    }

    fn raw_value() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z0-9 '%_$+-]{0,14}")
    }

    proptest! {
        #[test]
        fn placeholders_always_match_binds(
            user_id in raw_value(),
            name in raw_value(),
            nip in proptest::option::of("[0-9]{0,15}"),
            role in proptest::option::of(prop_oneof![
                Just("it".to_string()),
                Just("nurse".to_string()),
                "[a-z]{0,5}",
            ]),
            created_at in raw_value(),
            limit in raw_value(),
            offset in raw_value()
        ) {
            let search = UserSearchQuery { user_id, name, nip, role, created_at, limit, offset };
            let query = QueryComposer::search(BASE, &search, SoftDelete::Exclude).build();

            let count = query.binds.len();
            prop_assert_eq!(query.sql.matches('$').count(), count);
            for n in 1..=count {
                let placeholder = format!("${n}");
                prop_assert!(query.sql.contains(&placeholder));
            }
            let tail = format!("limit ${} offset ${}", count - 1, count);
            prop_assert!(query.sql.ends_with(&tail));
        }
    }
}
