use super::bind::BindValue;

/// Resolved `limit`/`offset` pair. Always emitted as the last two binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 5;

    /// Non-positive or missing values fall back to the defaults.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0).unwrap_or(Self::DEFAULT_LIMIT),
            offset: offset.filter(|o| *o > 0).unwrap_or(0),
        }
    }

    /// Lenient form for raw query-string values; unparseable text is treated
    /// as absent.
    pub fn from_raw(limit: Option<&str>, offset: Option<&str>) -> Self {
        let parse = |raw: Option<&str>| raw.and_then(|v| v.trim().parse::<i64>().ok());
        Self::new(parse(limit), parse(offset))
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub(crate) fn bind_values(&self) -> [BindValue; 2] {
        [BindValue::BigInt(self.limit), BindValue::BigInt(self.offset)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_replace_non_positive_values() {
        assert_eq!(Pagination::new(Some(0), Some(-3)), Pagination::default());
        assert_eq!(Pagination::new(None, None).limit(), 5);

        let negative = Pagination::new(Some(-1), Some(7));
        assert_eq!((negative.limit(), negative.offset()), (5, 7));

        let explicit = Pagination::new(Some(20), Some(40));
        assert_eq!((explicit.limit(), explicit.offset()), (20, 40));
    }

    #[test]
    fn raw_values_parse_leniently() {
        let p = Pagination::from_raw(Some("abc"), Some(" 10 "));
        assert_eq!(p.limit(), 5);
        assert_eq!(p.offset(), 10);
    }
}
