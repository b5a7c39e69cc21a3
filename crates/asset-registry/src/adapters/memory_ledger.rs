//! # In-Memory Ledger
//!
//! Simulated ledger holding private partitions and public state.
//!
//! Each invocation runs inside a [`LedgerTransaction`]:
//!
//! - Reads return committed state and record the version they observed
//! - Writes are buffered until [`LedgerTransaction::commit`]
//! - Commit fails with `MvccConflict` if any key read has changed since
//! - Commit fails with `EndorsementPolicyFailure` if a written key carries a
//!   validation parameter the endorsing orgs do not satisfy
//! - Dropping a transaction without committing discards its writes
//!
//! Private reads are restricted to the executing peer's own implicit
//! partition. Writes to other partitions are accepted (blind writes).

use crate::adapters::identity::StaticClientIdentity;
use crate::config::DEFAULT_PARTITION_PREFIX;
use crate::domain::policy::EndorsementPolicy;
use crate::domain::value_objects::{AssetKey, OrgId, PartitionName};
use crate::errors::StorageError;
use crate::ports::outbound::{
    InvocationContext, PrivateDataStore, PublicStateStore, TransientInput,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, warn};

// =============================================================================
// KEYS AND ENTRIES
// =============================================================================

/// Address of a value in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LedgerKey {
    /// Record in a private partition.
    Private {
        /// Partition holding the record.
        partition: PartitionName,
        /// Record key.
        key: AssetKey,
    },
    /// Public state key.
    Public(String),
}

impl LedgerKey {
    fn private(partition: &PartitionName, key: &AssetKey) -> Self {
        Self::Private {
            partition: partition.clone(),
            key: key.clone(),
        }
    }
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private { partition, key } => write!(f, "{partition}/{key}"),
            Self::Public(key) => f.write_str(key),
        }
    }
}

/// Committed state of one key. Deleted keys keep their version so that a
/// reader that saw the value still conflicts with the delete.
#[derive(Clone, Debug, Default)]
struct Entry {
    value: Option<Vec<u8>>,
    validation_parameter: Option<Vec<u8>>,
    version: u64,
}

#[derive(Clone, Debug)]
enum ValueWrite {
    Put(Vec<u8>),
    Delete,
}

#[derive(Clone, Debug, Default)]
struct PendingWrite {
    value: Option<ValueWrite>,
    validation_parameter: Option<Vec<u8>>,
}

// =============================================================================
// LEDGER
// =============================================================================

/// Committed world state shared by all invocations.
pub struct InMemoryLedger {
    world: RwLock<HashMap<LedgerKey, Entry>>,
    partition_prefix: String,
}

impl InMemoryLedger {
    /// Empty ledger using the implicit private partition convention.
    #[must_use]
    pub fn new() -> Self {
        Self::with_partition_prefix(DEFAULT_PARTITION_PREFIX)
    }

    /// Empty ledger whose peers own partitions named `<prefix><org>`.
    pub fn with_partition_prefix(prefix: impl Into<String>) -> Self {
        Self {
            world: RwLock::new(HashMap::new()),
            partition_prefix: prefix.into(),
        }
    }

    /// Start an invocation.
    #[must_use]
    pub fn begin(&self, invocation: Invocation) -> LedgerTransaction<'_> {
        let endorsers = invocation
            .endorsers
            .iter()
            .filter_map(|org| OrgId::parse(org.as_str()).ok())
            .collect();
        LedgerTransaction {
            ledger: self,
            client: invocation.client,
            peer_org: invocation.peer_org,
            endorsers,
            transient: invocation.transient,
            read_set: Mutex::new(HashMap::new()),
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Committed private record, bypassing transactions and membership.
    #[must_use]
    pub fn private_record(&self, partition: &PartitionName, key: &AssetKey) -> Option<Vec<u8>> {
        self.world
            .read()
            .get(&LedgerKey::private(partition, key))
            .and_then(|e| e.value.clone())
    }

    /// Committed validation parameter of a private record.
    #[must_use]
    pub fn private_validation_parameter(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Option<Vec<u8>> {
        self.world
            .read()
            .get(&LedgerKey::private(partition, key))
            .and_then(|e| e.validation_parameter.clone())
    }

    /// Committed public value.
    #[must_use]
    pub fn public_state(&self, key: &str) -> Option<Vec<u8>> {
        self.world
            .read()
            .get(&LedgerKey::Public(key.to_string()))
            .and_then(|e| e.value.clone())
    }

    /// Committed validation parameter of a public key.
    #[must_use]
    pub fn state_validation_parameter(&self, key: &str) -> Option<Vec<u8>> {
        self.world
            .read()
            .get(&LedgerKey::Public(key.to_string()))
            .and_then(|e| e.validation_parameter.clone())
    }

    /// Keys holding a live record in `partition`, sorted.
    #[must_use]
    pub fn private_keys(&self, partition: &PartitionName) -> Vec<AssetKey> {
        let world = self.world.read();
        let mut keys: Vec<AssetKey> = world
            .iter()
            .filter_map(|(k, e)| match k {
                LedgerKey::Private { partition: p, key } if p == partition && e.value.is_some() => {
                    Some(key.clone())
                }
                _ => None,
            })
            .collect();
        keys.sort();
        keys
    }

    /// Public keys holding a live value, sorted.
    #[must_use]
    pub fn public_keys(&self) -> Vec<String> {
        let world = self.world.read();
        let mut keys: Vec<String> = world
            .iter()
            .filter_map(|(k, e)| match k {
                LedgerKey::Public(key) if e.value.is_some() => Some(key.clone()),
                _ => None,
            })
            .collect();
        keys.sort();
        keys
    }

    fn committed(&self, key: &LedgerKey) -> (Option<Entry>, u64) {
        let world = self.world.read();
        let entry = world.get(key).cloned();
        let version = entry.as_ref().map_or(0, |e| e.version);
        (entry, version)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// INVOCATION
// =============================================================================

/// Who is invoking, on which peer, with which confidential input.
#[derive(Debug, Clone)]
pub struct Invocation {
    client: StaticClientIdentity,
    peer_org: String,
    endorsers: Vec<String>,
    transient: HashMap<String, Vec<u8>>,
}

impl Invocation {
    /// A client of `client_org` invoking on a peer of `peer_org`. The peer
    /// is the sole endorser.
    pub fn new(client_org: impl Into<String>, peer_org: impl Into<String>) -> Self {
        Self::with_client(StaticClientIdentity::new(client_org), peer_org)
    }

    /// A client without resolvable identity invoking on a peer of `peer_org`.
    pub fn anonymous(peer_org: impl Into<String>) -> Self {
        Self::with_client(StaticClientIdentity::anonymous(), peer_org)
    }

    /// Invocation by an explicit client identity.
    pub fn with_client(client: StaticClientIdentity, peer_org: impl Into<String>) -> Self {
        let peer_org = peer_org.into();
        Self {
            client,
            endorsers: vec![peer_org.clone()],
            peer_org,
            transient: HashMap::new(),
        }
    }

    /// Set the client's x509 subject.
    #[must_use]
    pub fn with_client_id(mut self, subject: &str) -> Self {
        self.client = self.client.with_subject(subject);
        self
    }

    /// Add a confidential input field.
    #[must_use]
    pub fn with_transient(mut self, field: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.transient.insert(field.into(), value.into());
        self
    }

    /// Collect an additional endorsement from a peer of `org`.
    #[must_use]
    pub fn with_endorser(mut self, org: impl Into<String>) -> Self {
        self.endorsers.push(org.into());
        self
    }
}

// =============================================================================
// TRANSACTION
// =============================================================================

/// One invocation against an [`InMemoryLedger`].
pub struct LedgerTransaction<'a> {
    ledger: &'a InMemoryLedger,
    client: StaticClientIdentity,
    peer_org: String,
    endorsers: BTreeSet<OrgId>,
    transient: HashMap<String, Vec<u8>>,
    read_set: Mutex<HashMap<LedgerKey, u64>>,
    writes: Mutex<BTreeMap<LedgerKey, PendingWrite>>,
}

impl LedgerTransaction<'_> {
    /// Validate and apply buffered writes.
    ///
    /// All writes land or none do.
    pub fn commit(self) -> Result<(), StorageError> {
        let read_set = self.read_set.into_inner();
        let writes = self.writes.into_inner();
        let mut world = self.ledger.world.write();

        for (key, seen) in &read_set {
            let current = world.get(key).map_or(0, |e| e.version);
            if current != *seen {
                warn!(key = %key, seen, current, "MVCC read conflict");
                return Err(StorageError::MvccConflict {
                    key: key.to_string(),
                });
            }
        }

        for key in writes.keys() {
            let Some(param) = world.get(key).and_then(|e| e.validation_parameter.as_ref()) else {
                continue;
            };
            let policy = EndorsementPolicy::from_bytes(param).map_err(|e| {
                StorageError::Corrupted {
                    partition: partition_label(key),
                    key: key.to_string(),
                    reason: e.to_string(),
                }
            })?;
            if !policy.is_satisfied_by(&self.endorsers) {
                let endorsers: Vec<String> =
                    self.endorsers.iter().map(ToString::to_string).collect();
                warn!(key = %key, ?endorsers, "Endorsement policy not satisfied");
                return Err(StorageError::EndorsementPolicyFailure {
                    key: key.to_string(),
                    endorsers,
                });
            }
        }

        let count = writes.len();
        for (key, write) in writes {
            let entry = world.entry(key).or_default();
            match write.value {
                Some(ValueWrite::Put(value)) => entry.value = Some(value),
                Some(ValueWrite::Delete) => {
                    entry.value = None;
                    entry.validation_parameter = None;
                }
                None => {}
            }
            if let Some(param) = write.validation_parameter {
                entry.validation_parameter = Some(param);
            }
            entry.version += 1;
        }
        debug!(writes = count, "Transaction committed");
        Ok(())
    }

    /// Organization of the executing peer.
    #[must_use]
    pub fn peer_org(&self) -> &str {
        &self.peer_org
    }

    fn record_read(&self, key: &LedgerKey) -> Option<Entry> {
        let (entry, version) = self.ledger.committed(key);
        self.read_set.lock().entry(key.clone()).or_insert(version);
        entry
    }

    fn buffer(&self, key: LedgerKey, apply: impl FnOnce(&mut PendingWrite)) {
        apply(self.writes.lock().entry(key).or_default());
    }

    fn check_membership(
        &self,
        operation: &'static str,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Result<(), StorageError> {
        let own = format!("{}{}", self.ledger.partition_prefix, self.peer_org);
        let implicit = partition.as_str().starts_with(&self.ledger.partition_prefix);
        if implicit && partition.as_str() != own {
            return Err(StorageError::Rejected {
                operation,
                key: key.to_string(),
                reason: format!(
                    "peer of org {} is not a member of collection {partition}",
                    self.peer_org
                ),
            });
        }
        Ok(())
    }
}

fn partition_label(key: &LedgerKey) -> String {
    match key {
        LedgerKey::Private { partition, .. } => partition.to_string(),
        LedgerKey::Public(_) => "public".to_string(),
    }
}

impl PrivateDataStore for LedgerTransaction<'_> {
    fn get_private_data(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        self.check_membership("get_private_data", partition, key)?;
        Ok(self
            .record_read(&LedgerKey::private(partition, key))
            .and_then(|e| e.value))
    }

    fn put_private_data(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
        value: &[u8],
    ) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::Rejected {
                operation: "put_private_data",
                key: String::new(),
                reason: "key must not be empty".into(),
            });
        }
        self.buffer(LedgerKey::private(partition, key), |w| {
            w.value = Some(ValueWrite::Put(value.to_vec()));
        });
        Ok(())
    }

    fn del_private_data(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Result<(), StorageError> {
        self.buffer(LedgerKey::private(partition, key), |w| {
            w.value = Some(ValueWrite::Delete);
            w.validation_parameter = None;
        });
        Ok(())
    }

    fn set_private_data_validation_parameter(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
        policy: &[u8],
    ) -> Result<(), StorageError> {
        self.buffer(LedgerKey::private(partition, key), |w| {
            w.validation_parameter = Some(policy.to_vec());
        });
        Ok(())
    }

    fn get_private_data_validation_parameter(
        &self,
        partition: &PartitionName,
        key: &AssetKey,
    ) -> Result<Option<Vec<u8>>, StorageError> {
        self.check_membership("get_private_data_validation_parameter", partition, key)?;
        Ok(self
            .record_read(&LedgerKey::private(partition, key))
            .and_then(|e| e.validation_parameter))
    }
}

impl PublicStateStore for LedgerTransaction<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self
            .record_read(&LedgerKey::Public(key.to_string()))
            .and_then(|e| e.value))
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if key.is_empty() {
            return Err(StorageError::Rejected {
                operation: "put_state",
                key: String::new(),
                reason: "key must not be empty".into(),
            });
        }
        self.buffer(LedgerKey::Public(key.to_string()), |w| {
            w.value = Some(ValueWrite::Put(value.to_vec()));
        });
        Ok(())
    }

    fn set_state_validation_parameter(&self, key: &str, policy: &[u8]) -> Result<(), StorageError> {
        self.buffer(LedgerKey::Public(key.to_string()), |w| {
            w.validation_parameter = Some(policy.to_vec());
        });
        Ok(())
    }

    fn get_state_validation_parameter(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self
            .record_read(&LedgerKey::Public(key.to_string()))
            .and_then(|e| e.validation_parameter))
    }
}

impl TransientInput for LedgerTransaction<'_> {
    fn get_transient(&self, field: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.transient.get(field).cloned())
    }
}

impl<'a> InvocationContext for LedgerTransaction<'a> {
    type Stub = LedgerTransaction<'a>;
    type Identity = StaticClientIdentity;

    fn stub(&self) -> &Self::Stub {
        self
    }

    fn client_identity(&self) -> &Self::Identity {
        &self.client
    }
}

// =============================================================================
// TESTS
// =============================================================================
