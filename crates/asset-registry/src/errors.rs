//! # Error Types
//!
//! All error types for the asset registry.
//!
//! | Category | Cause | Retried by the core |
//! |----------|-------|---------------------|
//! | [`ValidationError`] | Malformed or missing input | Never (caller-fixable) |
//! | [`IdentityError`] | Caller/peer org not resolvable | Never |
//! | [`AuthorizationError`] | Caller org is not the required org | Never |
//! | [`StorageError`] | Store read/write/policy-set failed | Never |

use thiserror::Error;

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Malformed or missing input. Always fixable by the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The payload could not be decoded.
    #[error("failed to unmarshal {payload} JSON: {reason}")]
    MalformedPayload {
        payload: &'static str,
        reason: String,
    },

    /// A required string field is empty.
    #[error("{field} field must be a non-empty string")]
    EmptyField { field: &'static str },

    /// `qty` is zero, negative or not a finite number.
    #[error("qty field must be a positive number, got {qty}")]
    NonPositiveQuantity { qty: f64 },

    /// An org identifier contains characters an MSP id cannot carry.
    #[error("{field} field is not a valid organization identifier: {value:?}")]
    InvalidOrg { field: &'static str, value: String },

    /// A confidential (transient) input field is absent.
    #[error("{field} not found in the transient map input")]
    MissingConfidentialInput { field: String },

    /// A confidential (transient) input field exceeds the configured limit.
    #[error("{field} transient input is {size} bytes, limit is {max}")]
    PayloadTooLarge {
        field: String,
        size: usize,
        max: usize,
    },

    /// No record exists for the given key.
    #[error("asset {asset_key} does not exist")]
    UnknownAsset { asset_key: String },

    /// The submitted transfer snapshot disagrees with the stored record.
    #[error("submitted asset is stale: {field} differs from the stored record")]
    StaleSnapshot { field: &'static str },
}

// =============================================================================
// IDENTITY ERRORS
// =============================================================================

/// The invocation context cannot resolve an organization identity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The client identity carries no MSP id.
    #[error("failed getting client's orgID: {0}")]
    ClientOrgUnavailable(String),

    /// The executing peer's MSP id is not configured.
    #[error("failed getting peer's orgID: {0}")]
    PeerOrgUnavailable(String),

    /// An MSP id was returned but is not a valid organization identifier.
    #[error("malformed organization identifier {value:?}")]
    MalformedOrg { value: String },

    /// The client id could not be read or decoded.
    #[error("failed to read clientID: {0}")]
    ClientId(String),
}

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// The caller's organization is not the organization required for the action.
///
/// Messages name the organizations involved and nothing else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Client and executing peer belong to different organizations.
    #[error(
        "client from org {client_org} is not authorized to read or write private data from an org {peer_org} peer"
    )]
    ForeignPeer { client_org: String, peer_org: String },

    /// Caller is not the asset's current owner.
    #[error("org {caller_org} is not the owner of this asset; current owner is {owner_org}")]
    NotOwner {
        caller_org: String,
        owner_org: String,
    },

    /// Caller tried to create an asset owned by another organization.
    #[error("org {caller_org} cannot issue an asset owned by org {owner_org}")]
    ForeignOwner {
        caller_org: String,
        owner_org: String,
    },
}

// =============================================================================
// POLICY ERRORS
// =============================================================================

/// Errors building or installing a write-endorsement policy.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    /// A policy must name at least one organization.
    #[error("endorsement policy must name at least one organization")]
    EmptyOrgSet,

    /// An organization identifier is not usable as a policy principal.
    #[error("failed to add org to endorsement policy: {0:?}")]
    MalformedOrg(String),

    /// Policy bytes could not be produced or parsed.
    #[error("failed to encode endorsement policy: {0}")]
    Encoding(String),

    /// The store rejected the policy.
    #[error("failed to set validation parameter on asset: {0}")]
    Store(#[from] StorageError),
}

// =============================================================================
// STORAGE ERRORS
// =============================================================================

/// Failures from the underlying store. Surfaced as-is, never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected a read or write.
    #[error("store rejected {operation} on {key}: {reason}")]
    Rejected {
        operation: &'static str,
        key: String,
        reason: String,
    },

    /// A stored record could not be decoded.
    #[error("record {key} in {partition} is corrupted: {reason}")]
    Corrupted {
        partition: String,
        key: String,
        reason: String,
    },

    /// A freshly generated key is already occupied.
    #[error("asset key {key} already exists in {partition}")]
    KeyCollision { partition: String, key: String },

    /// A record could not be encoded for storage.
    #[error("failed to marshal record: {0}")]
    Serialization(String),

    /// Installing a write-endorsement policy failed.
    #[error("failed setting endorsement policy for {key} in {partition}: {source}")]
    Policy {
        partition: String,
        key: String,
        #[source]
        source: Box<PolicyError>,
    },

    /// A key read during the invocation changed before commit.
    #[error("MVCC read conflict on {key}")]
    MvccConflict { key: String },

    /// The endorsing organizations do not satisfy a key's validation parameter.
    #[error("endorsement policy failure on {key}: endorsed by {endorsers:?}")]
    EndorsementPolicyFailure { key: String, endorsers: Vec<String> },
}

impl StorageError {
    /// Wrap a policy failure with the record it was meant for.
    #[must_use]
    pub fn policy(partition: impl Into<String>, key: impl Into<String>, source: PolicyError) -> Self {
        Self::Policy {
            partition: partition.into(),
            key: key.into(),
            source: Box::new(source),
        }
    }
}

// =============================================================================
// REGISTRY ERROR (UMBRELLA)
// =============================================================================

/// Any failure of a lifecycle operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// See [`ValidationError`].
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// See [`IdentityError`].
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// See [`AuthorizationError`].
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// See [`StorageError`].
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RegistryError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Identity(_) => "identity",
            Self::Authorization(_) => "authorization",
            Self::Storage(_) => "storage",
        }
    }
}

/// A failed invocation, tagged with the function that was invoked.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{function} failed: {source}")]
pub struct InvocationError {
    /// Invoked function name (e.g. `IssueAsset`).
    pub function: &'static str,
    /// Underlying failure.
    #[source]
    pub source: RegistryError,
}

impl InvocationError {
    /// Stable label of the underlying failure.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }
}

// =============================================================================
// TESTS
// =============================================================================
