use crate::db::query::{Clause, OrderTerm, Pagination, SearchSpec};
use crate::models::PatientSearchQuery;

use super::active;

impl SearchSpec for PatientSearchQuery {
    fn where_clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(3);
        if let Some(identity_number) = active(&self.identity_number) {
            clauses.push(Clause::eq_text("identity_number", identity_number));
        }
        if let Some(name) = active(&self.name) {
            clauses.push(Clause::contains("name", name));
        }
        if let Some(phone) = active(&self.phone_number) {
            // Form decoding turns a literal `+` into a space.
            let digits = phone.trim_start_matches(['+', ' ']);
            if !digits.is_empty() {
                clauses.push(Clause::starts_with(
                    "phone_number",
                    &format!("+{digits}"),
                ));
            }
        }
        clauses
    }

    fn pagination(&self) -> Pagination {
        Pagination::from_raw(self.limit.as_deref(), self.offset.as_deref())
    }

    fn order_by(&self) -> Vec<OrderTerm> {
        vec![OrderTerm::created_at(self.created_at.as_deref())]
    }
}
