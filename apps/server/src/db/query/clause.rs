//! Filter clauses: a static column, a closed comparison and one bound value.

use uuid::Uuid;

use super::bind::{BindValue, Placeholder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ge,
    Le,
    /// Case-insensitive `ILIKE`; the bound value is a complete pattern.
    ILike,
    /// Case-sensitive `LIKE`; the bound value is a complete pattern.
    Like,
}

impl Comparison {
    fn operator(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::ILike => "ilike",
            Self::Like => "like",
        }
    }
}

/// One predicate of a WHERE clause.
///
/// The column is a `&'static str` so only identifiers written in this crate
/// can reach the query text. The value is always bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    column: &'static str,
    comparison: Comparison,
    value: BindValue,
}

impl Clause {
    pub fn new(column: &'static str, comparison: Comparison, value: BindValue) -> Self {
        Self {
            column,
            comparison,
            value,
        }
    }

    pub fn eq_text(column: &'static str, value: impl Into<String>) -> Self {
        Self::new(column, Comparison::Eq, BindValue::Text(value.into()))
    }

    pub fn eq_uuid(column: &'static str, value: Uuid) -> Self {
        Self::new(column, Comparison::Eq, BindValue::Uuid(value))
    }

    /// Substring match ignoring case.
    pub fn contains(column: &'static str, needle: &str) -> Self {
        let pattern = format!("%{}%", escape_like_pattern(needle));
        Self::new(column, Comparison::ILike, BindValue::Text(pattern))
    }

    pub fn starts_with(column: &'static str, prefix: &str) -> Self {
        let pattern = format!("{}%", escape_like_pattern(prefix));
        Self::new(column, Comparison::Like, BindValue::Text(pattern))
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn value(&self) -> &BindValue {
        &self.value
    }

    pub(crate) fn render(&self, placeholder: Placeholder) -> String {
        format!(
            "{} {} {}",
            self.column,
            self.comparison.operator(),
            placeholder
        )
    }
}

/// Escape SQL LIKE meta-characters so user input is matched literally.
/// PostgreSQL uses `\` as the default LIKE escape character.
pub(crate) fn escape_like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::query::bind::Binds;

    #[test]
    fn contains_wraps_and_escapes() {
        let clause = Clause::contains("name", "50%_off");
        assert_eq!(clause.comparison(), Comparison::ILike);
        assert_eq!(
            clause.value(),
            &BindValue::Text("%50\\%\\_off%".to_string())
        );
    }

    #[test]
    fn render_uses_placeholder_not_value() {
        let clause = Clause::eq_text("identity_number", "'; drop table users; --");
        let mut binds = Binds::default();
        let placeholder = binds.push(clause.value().clone());
        let sql = clause.render(placeholder);
        assert_eq!(sql, "identity_number = $1");
        assert!(!sql.contains("drop"));
    }
}
