//! Parameterized query composition for list/search endpoints.
//!
//! Builds SQL from:
//! - a static base `SELECT`
//! - filter [`Clause`]s (AND-ed, values always bound)
//! - the soft-delete predicate
//! - [`OrderTerm`]s over code-defined columns
//! - [`Pagination`] as the final two placeholders
//!
//! Nothing supplied by a request is ever spliced into the SQL text; it only
//! reaches the database through [`BindValue`]s.

mod bind;
mod clause;
mod order;
mod pagination;
pub mod specs;
mod widen;

pub use bind::{BindValue, Placeholder};
pub use clause::{Clause, Comparison};
pub use order::{OrderTerm, SortDirection};
pub use pagination::Pagination;
pub use widen::{widen_prefix, PrefixRange};

use bind::Binds;

pub const SOFT_DELETE_PREDICATE: &str = "deleted_at is null";

/// Composed SQL plus its binds, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterizedQuery {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDelete {
    /// Append `deleted_at is null`.
    Exclude,
    Include,
}

/// A per-request search turned into composer inputs.
pub trait SearchSpec {
    /// Active filters in a stable order.
    fn where_clauses(&self) -> Vec<Clause>;

    fn pagination(&self) -> Pagination;

    fn order_by(&self) -> Vec<OrderTerm>;
}

#[derive(Debug, Clone)]
pub struct QueryComposer {
    base: &'static str,
    clauses: Vec<Clause>,
    soft_delete: SoftDelete,
    order_by: Vec<OrderTerm>,
    pagination: Option<Pagination>,
}

impl QueryComposer {
    pub fn new(base: &'static str) -> Self {
        Self {
            base,
            clauses: Vec::new(),
            soft_delete: SoftDelete::Include,
            order_by: Vec::new(),
            pagination: None,
        }
    }

    /// Base query with filters, ordering and pagination taken from `request`.
    pub fn search<S: SearchSpec + ?Sized>(
        base: &'static str,
        request: &S,
        soft_delete: SoftDelete,
    ) -> Self {
        Self::new(base)
            .filter(request.where_clauses())
            .soft_delete(soft_delete)
            .order_by(request.order_by())
            .paginate(request.pagination())
    }

    pub fn filter(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.clauses.extend(clauses);
        self
    }

    pub fn soft_delete(mut self, soft_delete: SoftDelete) -> Self {
        self.soft_delete = soft_delete;
        self
    }

    pub fn order_by(mut self, terms: impl IntoIterator<Item = OrderTerm>) -> Self {
        self.order_by.extend(terms);
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    /// Render the query. Pure: repeated calls give identical output.
    pub fn build(&self) -> ParameterizedQuery {
        let mut binds = Binds::default();
        let mut predicates: Vec<String> = self
            .clauses
            .iter()
            .map(|clause| clause.render(binds.push(clause.value().clone())))
            .collect();

        if self.soft_delete == SoftDelete::Exclude {
            predicates.push(SOFT_DELETE_PREDICATE.to_string());
        }

        let mut sql = self.base.trim_end().to_string();
        if !predicates.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&predicates.join(" and "));
        }

        if !self.order_by.is_empty() {
            let terms: Vec<String> = self.order_by.iter().map(ToString::to_string).collect();
            sql.push_str(" order by ");
            sql.push_str(&terms.join(", "));
        }

        if let Some(pagination) = &self.pagination {
            let [limit, offset] = pagination.bind_values();
            let limit = binds.push(limit);
            let offset = binds.push(offset);
            sql.push_str(&format!(" limit {limit} offset {offset}"));
        }

        ParameterizedQuery {
            sql,
            binds: binds.into_values(),
        }
    }
}
