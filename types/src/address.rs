//! EVM account address type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::TypesError;

/// An EVM account address: `0x` followed by 40 hex digits.
///
/// The original spelling is preserved for display, but equality and hashing
/// ignore ASCII case, so `0xAbC...` and `0xabc...` are the same account.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The prefix every address carries.
    pub const PREFIX: &'static str = "0x";

    /// Total length of a well-formed address, prefix included.
    pub const LEN: usize = 42;

    /// Parse and validate an address string.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let raw = raw.trim();
        if raw.len() != Self::LEN {
            return Err(TypesError::InvalidAddress(format!(
                "expected {} characters, got {}",
                Self::LEN,
                raw.len()
            )));
        }
        let (prefix, digits) = match (raw.get(..Self::PREFIX.len()), raw.get(Self::PREFIX.len()..)) {
            (Some(prefix), Some(digits)) => (prefix, digits),
            _ => return Err(TypesError::InvalidAddress(format!("{raw} is not ASCII"))),
        };
        if !prefix.eq_ignore_ascii_case(Self::PREFIX) {
            return Err(TypesError::InvalidAddress(format!(
                "{raw} does not start with {}",
                Self::PREFIX
            )));
        }
        hex::decode(digits)
            .map_err(|e| TypesError::InvalidAddress(format!("{raw}: {e}")))?;
        Ok(Self(raw.to_string()))
    }

    /// Return the address as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercase form, used as a canonical map key.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Case-insensitive comparison against a raw address string from a record.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}
