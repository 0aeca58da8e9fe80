use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Exact, case-sensitive match on `asc` / `desc`.
    pub fn from_requested(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// One `ORDER BY` term over a column named in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm {
    column: &'static str,
    direction: SortDirection,
}

impl OrderTerm {
    pub const CREATED_AT: &'static str = "created_at";

    pub fn new(column: &'static str, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// `created_at` in the requested direction, `desc` unless the request is
    /// exactly `asc` or `desc`.
    pub fn created_at(requested: Option<&str>) -> Self {
        let direction = requested
            .and_then(SortDirection::from_requested)
            .unwrap_or(SortDirection::Desc);
        Self::new(Self::CREATED_AT, direction)
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for OrderTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.direction.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_directions_are_honoured() {
        assert_eq!(OrderTerm::created_at(Some("asc")).to_string(), "created_at asc");
        assert_eq!(OrderTerm::created_at(Some("desc")).to_string(), "created_at desc");
        for raw in ["DESC", "ASC", "Asc", "asc;drop", "", "random"] {
            assert_eq!(
                OrderTerm::created_at(Some(raw)).to_string(),
                "created_at desc",
                "{raw:?}"
            );
        }
        assert_eq!(OrderTerm::created_at(None).direction(), SortDirection::Desc);
    }
}
