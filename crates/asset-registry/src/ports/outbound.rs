//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the registry depends on. The ledger provides ordering,
//! durability and commit-time conflict detection; the registry only issues
//! synchronous reads and writes within a single invocation.
//!
//! Reads return committed state. Writes become visible only if the
//! invocation commits.

use crate::domain::value_objects::{AssetKey, PartitionName};
use crate::errors::{IdentityError, StorageError};
use uuid::Uuid;

// =============================================================================
// PRIVATE DATA
// =============================================================================

/// Per-organization private partitions.
pub trait PrivateDataStore {
    /// Read a record. `None` if the key is absent.
    fn get_private_data(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a record.
    fn put_private_data(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
        value: &[u8],
    ) -> Result<(), StorageError>;

    /// Delete a record.
    fn del_private_data(&self, partition: &PartitionName, key: &AssetKey)
        -> Result<(), StorageError>;

    /// Replace the write-endorsement policy of a record.
    fn set_private_data_validation_parameter(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
        policy: &[u8],
    ) -> Result<(), StorageError>;

    /// Read the write-endorsement policy of a record.
    fn get_private_data_validation_parameter(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Result<Option<Vec<u8>>, StorageError>;
}

// =============================================================================
// PUBLIC STATE
// =============================================================================

/// Shared public state visible to every organization.
pub trait PublicStateStore {
    /// Read a public value.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write a public value.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Replace the write-endorsement policy of a public key.
    fn set_state_validation_parameter(&self, key: &str, policy: &[u8])
        -> Result<(), StorageError>;

    /// Read the write-endorsement policy of a public key.
    fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
}

// =============================================================================
// TRANSIENT INPUT
// =============================================================================

/// Confidential side-channel input. Never recorded in the public
/// transaction log.
pub trait TransientInput {
    /// Read a confidential field. `None` if absent.
    fn get_transient(&self, field: &str) -> Result<Option<Vec<u8>>, StorageError>;
}

/// Everything an invocation can do against the ledger.
pub trait LedgerStub: PrivateDataStore + PublicStateStore + TransientInput {}

impl<T: PrivateDataStore + PublicStateStore + TransientInput> LedgerStub for T {}

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity of the client that submitted the invocation.
pub trait ClientIdentity {
    /// MSP id of the client's organization.
    fn get_msp_id(&self) -> Result<String, IdentityError>;

    /// Base64-encoded unique id of the client (subject and issuer).
    fn get_id(&self) -> Result<String, IdentityError>;
}

/// Identity of the peer executing the invocation.
pub trait PeerIdentity: Send + Sync {
    /// MSP id of the local peer's organization.
    fn local_msp_id(&self) -> Result<String, IdentityError>;
}

/// Per-invocation context handed to the registry.
pub trait InvocationContext {
    /// Ledger access.
    type Stub: LedgerStub;
    /// Client identity.
    type Identity: ClientIdentity;

    /// Ledger access for this invocation.
    fn stub(&self) -> &Self::Stub;

    /// Identity of the submitting client.
    fn client_identity(&self) -> &Self::Identity;
}

// =============================================================================
// UNIQUE TOKENS
// =============================================================================

/// Source of asset identity tokens.
pub trait TokenGenerator: Send + Sync {
    /// A fresh 128-bit random token.
    fn new_unique_token(&self) -> Uuid;

    /// A value that varies between calls (e.g. a timestamp), mixed into
    /// storage keys.
    fn freshness(&self) -> u64;
}

// =============================================================================
// TESTS
// =============================================================================
