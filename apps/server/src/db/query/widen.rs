//! Numeric prefix widening.
//!
//! Employee IDs are stored as integers, so "starts with 615" becomes the
//! inclusive range `6150000000000..=6159999999999` over the 13-digit space.

use super::bind::BindValue;
use super::clause::{Clause, Comparison};

/// Inclusive bounds produced by [`widen_prefix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    pub lower: u64,
    pub upper: u64,
}

impl PrefixRange {
    /// Matches no value.
    pub const EMPTY: PrefixRange = PrefixRange { lower: 1, upper: 0 };

    /// `column >= lower` followed by `column <= upper`.
    ///
    /// Returns `None` when a bound does not fit a Postgres `bigint`.
    pub fn into_clauses(self, column: &'static str) -> Option<[Clause; 2]> {
        let lower = i64::try_from(self.lower).ok()?;
        let upper = i64::try_from(self.upper).ok()?;
        Some([
            Clause::new(column, Comparison::Ge, BindValue::BigInt(lower)),
            Clause::new(column, Comparison::Le, BindValue::BigInt(upper)),
        ])
    }
}

/// Widen a decimal prefix to every `width`-digit number that starts with it.
///
/// The digit count of `prefix` is significant: `"0615"` is a four-digit
/// prefix. A prefix at least `width` digits long is its own range, which
/// cannot match a shorter identifier. Returns `None` for empty or non-digit
/// input and on overflow.
pub fn widen_prefix(prefix: &str, width: usize) -> Option<PrefixRange> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = prefix.parse().ok()?;
    let missing = u32::try_from(width.saturating_sub(prefix.len())).ok()?;
    let scale = 10u64.checked_pow(missing)?;
    let lower = value.checked_mul(scale)?;
    let upper = lower.checked_add(scale - 1)?;
    Some(PrefixRange { lower, upper })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_prefix_covers_thirteen_digit_space() {
        let range = widen_prefix("615", 13).unwrap();
        assert_eq!(range.lower, 6_150_000_000_000);
        assert_eq!(range.upper, 6_159_999_999_999);
    }

    #[test]
    fn full_length_prefix_is_a_point() {
        let range = widen_prefix("6152202401123", 13).unwrap();
        assert_eq!(range.lower, range.upper);
    }

    #[test]
    fn rejects_non_digits_and_overflow() {
        assert_eq!(widen_prefix("", 13), None);
        assert_eq!(widen_prefix("61a", 13), None);
        assert_eq!(widen_prefix("-61", 13), None);
        assert_eq!(widen_prefix("9", 25), None);
    }

    #[test]
    fn clauses_bind_both_bounds() {
        let [ge, le] = widen_prefix("303", 13)
            .unwrap()
            .into_clauses("employee_id")
            .unwrap();
        assert_eq!(ge.comparison(), Comparison::Ge);
        assert_eq!(ge.value(), &BindValue::BigInt(3_030_000_000_000));
        assert_eq!(le.comparison(), Comparison::Le);
        assert_eq!(le.value(), &BindValue::BigInt(3_039_999_999_999));
    }
}
