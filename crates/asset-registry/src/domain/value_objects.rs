//! # Value Objects
//!
//! Immutable identifiers used throughout the registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ORGANIZATION ID
// =============================================================================

/// Identifier of an organization (its MSP id).
///
/// Non-empty, ASCII alphanumerics plus `.`, `-` and `_`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrgId(String);

impl OrgId {
    /// Longest accepted identifier.
    pub const MAX_LEN: usize = 128;

    /// Parse an org id, rejecting empty or malformed values.
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidOrgId> {
        let value = value.into();
        if value.is_empty() {
            return Err(InvalidOrgId::Empty);
        }
        if value.len() > Self::MAX_LEN {
            return Err(InvalidOrgId::TooLong(value.len()));
        }
        if let Some(c) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')))
        {
            return Err(InvalidOrgId::IllegalChar(c));
        }
        Ok(Self(value))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrgId {
    type Error = InvalidOrgId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<OrgId> for String {
    fn from(org: OrgId) -> Self {
        org.0
    }
}

impl AsRef<str> for OrgId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OrgId({})", self.0)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a string is not an [`OrgId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOrgId {
    /// Empty string.
    #[error("organization identifier must not be empty")]
    Empty,
    /// Longer than [`OrgId::MAX_LEN`].
    #[error("organization identifier is {0} bytes long")]
    TooLong(usize),
    /// Contains a character outside the MSP id alphabet.
    #[error("organization identifier contains {0:?}")]
    IllegalChar(char),
}

// =============================================================================
// ASSET ID
// =============================================================================

/// Permanent business identity of an asset. Random, stable across transfers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Wrap a freshly generated token.
    #[must_use]
    pub const fn from_token(token: Uuid) -> Self {
        Self(token)
    }

    /// The underlying token.
    #[must_use]
    pub const fn token(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

// =============================================================================
// ASSET KEY
// =============================================================================

/// Storage key of an asset record. Assigned once at creation, never reused
/// as business identity.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    /// Wrap a key received from a caller or the store.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PARTITION NAME
// =============================================================================

/// Name of an organization's exclusive private partition.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionName(String);

impl PartitionName {
    /// Wrap an already-derived partition name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
