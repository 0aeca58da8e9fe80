use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Digit group of a staff identifier that carries a range constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Gender,
    BirthYear,
    BirthMonth,
    Sequence,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gender => "gender digit",
            Self::BirthYear => "birth year",
            Self::BirthMonth => "birth month",
            Self::Sequence => "sequence",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Wrong length or a non-digit character.
    #[error("{kind} must be exactly {expected} ASCII digits")]
    InvalidFormat { kind: &'static str, expected: usize },

    /// Structurally valid digits whose value is outside the accepted domain.
    #[error("{field} {value} is out of range")]
    OutOfRange { field: Field, value: u32 },

    #[error("unknown role prefix '{0}'")]
    UnknownRole(String),
}

impl Error {
    /// Stable label used for metrics and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidFormat { .. } => "invalid_format",
            Self::OutOfRange { .. } => "out_of_range",
            Self::UnknownRole(_) => "unknown_role",
        }
    }
}
