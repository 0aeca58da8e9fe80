use std::fmt;

use uuid::Uuid;

/// Bind values for `sqlx` queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    BigInt(i64),
    Uuid(Uuid),
}

/// A positional `$N` marker. Only [`Binds::push`] hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(usize);

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Placeholder counter. Every pushed value gets the next `$N`, starting at 1.
#[derive(Debug, Default)]
pub(crate) struct Binds {
    values: Vec<BindValue>,
}

impl Binds {
    pub(crate) fn push(&mut self, value: BindValue) -> Placeholder {
        self.values.push(value);
        Placeholder(self.values.len())
    }

    pub(crate) fn into_values(self) -> Vec<BindValue> {
        self.values
    }
}
