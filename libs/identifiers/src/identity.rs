//! Patient identity numbers: 16 decimal digits with no embedded structure.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityNumber(String);

impl IdentityNumber {
    pub const DIGITS: usize = 16;

    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != Self::DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidFormat {
                kind: "identity number",
                expected: Self::DIGITS,
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Validates the numeric wire form (`"identityNumber": 3271012345678901`).
    pub fn from_u64(value: u64) -> Result<Self> {
        Self::parse(&value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form for JSON responses. Sixteen digits always fit in a `u64`.
    pub fn as_u64(&self) -> u64 {
        self.0
            .bytes()
            .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for IdentityNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::IdentityNumber;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for IdentityNumber {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_u64(self.as_u64())
        }
    }

    struct IdentityNumberVisitor;

    impl Visitor<'_> for IdentityNumberVisitor {
        type Value = IdentityNumber;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a 16-digit identity number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<IdentityNumber, E> {
            IdentityNumber::from_u64(v).map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<IdentityNumber, E> {
            let v = u64::try_from(v).map_err(|_| E::custom("identity number is negative"))?;
            self.visit_u64(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<IdentityNumber, E> {
            IdentityNumber::parse(v).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for IdentityNumber {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(IdentityNumberVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sixteen_digits() {
        let id = IdentityNumber::parse("3271012345678901").unwrap();
        assert_eq!(id.as_str(), "3271012345678901");
        assert_eq!(id.as_u64(), 3_271_012_345_678_901);
    }

    #[test]
    fn rejects_other_lengths_and_non_digits() {
        for raw in ["327101234567890", "32710123456789012", "32710123456789a1", ""] {
            assert!(matches!(
                IdentityNumber::parse(raw),
                Err(Error::InvalidFormat { expected: 16, .. })
            ));
        }
    }

    #[test]
    fn from_u64_requires_sixteen_significant_digits() {
        assert!(IdentityNumber::from_u64(1_234_567_890_123_456).is_ok());
        assert!(IdentityNumber::from_u64(123_456_789_012_345).is_err());
    }
}
