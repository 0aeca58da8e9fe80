//! Staff identifier (NIP) codec.
//!
//! A NIP is a 13-digit decimal number with a fixed positional layout:
//!
//! ```text
//! 615 2 2024 01 123
//! │   │ │    │  └─ sequence (3 digits, free-form)
//! │   │ │    └──── birth month (01..=12)
//! │   │ └───────── birth year (2000..=current year)
//! │   └─────────── gender (1 = male, 2 = female)
//! └─────────────── role prefix (615 = IT, 303 = nurse)
//! ```

use chrono::Datelike;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Field, Result};

const MIN_BIRTH_YEAR: u32 = 2000;

/// Staff category encoded in the first three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    It,
    Nurse,
}

impl Role {
    /// Fixed three-digit prefix of every identifier with this role.
    pub const fn prefix(self) -> u64 {
        match self {
            Self::It => 615,
            Self::Nurse => 303,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Nurse => "nurse",
        }
    }

    /// Resolves a query-string role tag (`it` / `nurse`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "it" => Some(Self::It),
            "nurse" => Some(Self::Nurse),
            _ => None,
        }
    }

    fn from_prefix(prefix: &str) -> Result<Self> {
        match prefix {
            "615" => Ok(Self::It),
            "303" => Ok(Self::Nurse),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn digit(self) -> u8 {
        match self {
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    fn from_digit(digit: u32) -> Result<Self> {
        match digit {
            1 => Ok(Self::Male),
            2 => Ok(Self::Female),
            value => Err(Error::OutOfRange {
                field: Field::Gender,
                value,
            }),
        }
    }
}

/// Decoded staff identifier.
///
/// Formatting with `Display` yields the canonical 13-digit layout, and decoding
/// that string again reproduces the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaffId {
    role: Role,
    gender: Gender,
    birth_year: u16,
    birth_month: u8,
    sequence: u16,
}

impl StaffId {
    /// Total number of digits in a NIP.
    pub const DIGITS: usize = 13;
    /// Number of digits in the role prefix.
    pub const PREFIX_DIGITS: usize = 3;
    const MAX_SEQUENCE: u16 = 999;

    /// Builds an identifier from its parts, applying the same range checks as
    /// [`StaffId::decode`].
    pub fn new(
        role: Role,
        gender: Gender,
        birth_year: u16,
        birth_month: u8,
        sequence: u16,
    ) -> Result<Self> {
        check_month(u32::from(birth_month))?;
        check_year(u32::from(birth_year), current_year())?;
        if sequence > Self::MAX_SEQUENCE {
            return Err(Error::OutOfRange {
                field: Field::Sequence,
                value: u32::from(sequence),
            });
        }
        Ok(Self {
            role,
            gender,
            birth_year,
            birth_month,
            sequence,
        })
    }

    /// Decodes a NIP against the current calendar year.
    pub fn decode(raw: &str) -> Result<Self> {
        Self::decode_with_year(raw, current_year())
    }

    /// Decodes a NIP, bounding the birth year by `current_year`.
    ///
    /// Digit groups are validated right to left: sequence, month, year, gender,
    /// then the role prefix.
    pub fn decode_with_year(raw: &str, current_year: i32) -> Result<Self> {
        if raw.len() != Self::DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidFormat {
                kind: "nip",
                expected: Self::DIGITS,
            });
        }

        let (head, sequence) = raw.split_at(10);
        let (head, month) = head.split_at(8);
        let (head, year) = head.split_at(4);
        let (prefix, gender) = head.split_at(3);

        // Three digits never exceed 999.
        let sequence = digits_value(sequence) as u16;

        let month = digits_value(month);
        check_month(month)?;

        let year = digits_value(year);
        check_year(year, current_year)?;

        let gender = Gender::from_digit(digits_value(gender))?;
        let role = Role::from_prefix(prefix)?;

        Ok(Self {
            role,
            gender,
            birth_year: year as u16,
            birth_month: month as u8,
            sequence,
        })
    }

    /// Decodes the numeric wire form (`"nip": 6152202401123`).
    pub fn from_u64(value: u64) -> Result<Self> {
        Self::decode(&value.to_string())
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn birth_year(&self) -> u16 {
        self.birth_year
    }

    pub fn birth_month(&self) -> u8 {
        self.birth_month
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    pub fn as_u64(&self) -> u64 {
        self.role.prefix() * 10_000_000_000
            + u64::from(self.gender.digit()) * 1_000_000_000
            + u64::from(self.birth_year) * 100_000
            + u64::from(self.birth_month) * 1_000
            + u64::from(self.sequence)
    }

    /// Database representation; 13 digits always fit in an `i64`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn as_i64(&self) -> i64 {
        self.as_u64() as i64
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}{}{:04}{:02}{:03}",
            self.role.prefix(),
            self.gender.digit(),
            self.birth_year,
            self.birth_month,
            self.sequence
        )
    }
}

impl FromStr for StaffId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

fn check_month(month: u32) -> Result<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field: Field::BirthMonth,
            value: month,
        })
    }
}

fn check_year(year: u32, current_year: i32) -> Result<()> {
    let max = u32::try_from(current_year).unwrap_or(0);
    if (MIN_BIRTH_YEAR..=max).contains(&year) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field: Field::BirthYear,
            value: year,
        })
    }
}

/// Value of a short, already-validated ASCII digit run.
pub(crate) fn digits_value(digits: &str) -> u32 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::StaffId;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for StaffId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u64(self.as_u64())
        }
    }

    struct StaffIdVisitor;

    impl Visitor<'_> for StaffIdVisitor {
        type Value = StaffId;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a 13-digit staff identifier")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<StaffId, E> {
            StaffId::from_u64(v).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<StaffId, E> {
            let v = u64::try_from(v).map_err(|_| E::custom("staff identifier is negative"))?;
            self.visit_u64(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<StaffId, E> {
            StaffId::decode(v).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for StaffId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(StaffIdVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_it_identifier() {
        let id = StaffId::decode_with_year("6152202401123", 2025).unwrap();
        assert_eq!(id.role(), Role::It);
        assert_eq!(id.gender(), Gender::Female);
        assert_eq!(id.birth_year(), 2024);
        assert_eq!(id.birth_month(), 1);
        assert_eq!(id.sequence(), 123);
    }

    #[test]
    fn decodes_nurse_identifier() {
        let id = StaffId::decode_with_year("3031202401123", 2025).unwrap();
        assert_eq!(id.role(), Role::Nurse);
        assert_eq!(id.gender(), Gender::Male);
        assert_eq!(id.birth_year(), 2024);
        assert_eq!(id.birth_month(), 1);
    }

    #[test]
    fn month_thirteen_is_out_of_range() {
        let err = StaffId::decode_with_year("6152202413123", 2025).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfRange {
                field: Field::BirthMonth,
                value: 13
            }
        );
    }

    #[test]
    fn month_zero_is_out_of_range() {
        let err = StaffId::decode_with_year("6152202400123", 2025).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                field: Field::BirthMonth,
                ..
            }
        ));
    }

    #[test]
    fn year_is_bounded_by_current_year() {
        assert!(StaffId::decode_with_year("6152202501123", 2025).is_ok());
        let err = StaffId::decode_with_year("6152202601123", 2025).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfRange {
                field: Field::BirthYear,
                value: 2026
            }
        );
        let err = StaffId::decode_with_year("6152199901123", 2025).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRange {
                field: Field::BirthYear,
                ..
            }
        ));
    }

    #[test]
    fn gender_digit_must_be_one_or_two() {
        for raw in ["6150202401123", "6153202401123", "6159202401123"] {
            let err = StaffId::decode_with_year(raw, 2025).unwrap_err();
            assert!(matches!(
                err,
                Error::OutOfRange {
                    field: Field::Gender,
                    ..
                }
            ));
        }
    }

    #[test]
    fn unknown_prefix_is_distinct_from_format_errors() {
        let err = StaffId::decode_with_year("9992202401123", 2025).unwrap_err();
        assert_eq!(err, Error::UnknownRole("999".to_string()));
        assert_eq!(err.reason(), "unknown_role");
    }

    #[test]
    fn range_checks_run_before_role_check() {
        // Unknown prefix and bad month: the month is reported first.
        let err = StaffId::decode_with_year("9992202413123", 2025).unwrap_err();
        assert_eq!(err.reason(), "out_of_range");
    }

    #[test]
    fn rejects_wrong_length_and_charset() {
        for raw in ["", "615220240112", "61522024011234", "61522024O1123", "+615220240112"] {
            let err = StaffId::decode_with_year(raw, 2025).unwrap_err();
            assert_eq!(
                err,
                Error::InvalidFormat {
                    kind: "nip",
                    expected: 13
                },
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn display_is_canonical_layout() {
        let id = StaffId::decode_with_year("3031200507007", 2025).unwrap();
        assert_eq!(id.to_string(), "3031200507007");
        assert_eq!(id.as_u64(), 3_031_200_507_007);
        assert_eq!(id.as_i64(), 3_031_200_507_007);
    }

    #[test]
    fn role_tags() {
        assert_eq!(Role::from_tag("it"), Some(Role::It));
        assert_eq!(Role::from_tag("nurse"), Some(Role::Nurse));
        assert_eq!(Role::from_tag("IT"), None);
        assert_eq!(Role::It.prefix(), 615);
        assert_eq!(Role::Nurse.prefix(), 303);
    }
}
