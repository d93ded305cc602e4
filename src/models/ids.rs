//! Strongly-typed ID wrappers
//!
//! Using newtype wrappers keeps record ids from being confused with other
//! strings (names, amounts) at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const PREFIX: &str = "exp-";

/// Identifier of one expense record
///
/// Displayed in short form (`exp-` plus the first eight hex digits of the
/// UUID), which is what users type back into the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a full UUID, with or without the `exp-` prefix
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let s = s.trim();
        Uuid::parse_str(s.strip_prefix(PREFIX).unwrap_or(s)).map(Self)
    }

    /// Check whether a user-typed reference points at this id
    ///
    /// Accepts the short display form (`exp-1a2b3c4d`), the full UUID,
    /// or a prefix of the UUID's hex form.
    pub fn matches(&self, reference: &str) -> bool {
        let reference = reference.trim().to_ascii_lowercase();
        let hex = reference.strip_prefix(PREFIX).unwrap_or(reference.as_str());
        !hex.is_empty() && self.0.hyphenated().to_string().starts_with(hex)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.0.simple().to_string();
        write!(f, "{}{}", PREFIX, &hex[..8])
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
