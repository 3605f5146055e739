//! Identifier types used by the storage backends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

/// Store-assigned identifier, unique within a kind.
///
/// Rendered as a decimal integer in paths and JSON bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericId(i64);

impl NumericId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Parses a decimal identifier, e.g. a `{id}` path segment.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for NumericId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NumericId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for NumericId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Randomly generated identifier used by the in-memory backend.
/// Uses UUID v4; uniqueness is enforced by the backend, not assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RandomId(Uuid);

impl RandomId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses an identifier from its textual UUID form.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for RandomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RandomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for RandomId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier attached to an entity value just before it is encoded.
///
/// Serialises untagged, so clients only ever see the bare number or string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityKey {
    Numeric(NumericId),
    Random(RandomId),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => id.fmt(f),
            Self::Random(id) => id.fmt(f),
        }
    }
}

impl From<NumericId> for EntityKey {
    fn from(id: NumericId) -> Self {
        Self::Numeric(id)
    }
}

impl From<RandomId> for EntityKey {
    fn from(id: RandomId) -> Self {
        Self::Random(id)
    }
}
