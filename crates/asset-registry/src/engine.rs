//! # Asset Lifecycle Engine
//!
//! Create, read, locate and transfer. Every operation is a synchronous
//! sequence of reads, checks and writes against the invocation's stub. The
//! engine holds no state between invocations and never retries; atomicity
//! and conflict detection belong to the ledger.
//!
//! ## Transfer
//!
//! | Step | Failure |
//! |------|---------|
//! | Snapshot shape, buyer org | `ValidationError` |
//! | Caller is snapshot owner, caller is executor | `AuthorizationError` |
//! | Public marker names the caller | `AuthorizationError::NotOwner` |
//! | Record exists in caller's partition | `ValidationError::UnknownAsset` |
//! | Snapshot restates stored record | `ValidationError::StaleSnapshot` |
//! | Write buyer copy, policy `{buyer}`, delete seller copy, re-point marker | `StorageError` |

use crate::domain::entities::{Asset, AssetInput, AssetLocation, AssetStatus, OwnershipMarker};
use crate::domain::invariants::{
    check_placement_invariant, check_snapshot_matches, validate_asset_input, validate_buyer_org,
    validate_transfer_snapshot,
};
use crate::domain::services::{new_asset_identity, partition_for};
use crate::domain::value_objects::{AssetKey, OrgId, PartitionName};
use crate::errors::{AuthorizationError, RegistryError, StorageError, ValidationError};
use crate::identity::IdentityResolver;
use crate::policy::{set_state_endorsers, set_write_endorsers};
use crate::ports::outbound::{
    InvocationContext, PeerIdentity, PrivateDataStore, PublicStateStore, TokenGenerator,
};
use registry_telemetry::log_asset_event;
use tracing::{debug, info, warn};

/// Partition label used for errors about public state.
const PUBLIC_STATE: &str = "public";

/// Orchestrates asset lifecycle operations.
pub struct AssetLifecycleEngine<P: PeerIdentity, G: TokenGenerator> {
    identity: IdentityResolver<P>,
    tokens: G,
    partition_prefix: String,
}

impl<P: PeerIdentity, G: TokenGenerator> AssetLifecycleEngine<P, G> {
    /// Engine executing on `peer`, minting identities from `tokens`.
    pub fn new(peer: P, tokens: G, partition_prefix: impl Into<String>) -> Self {
        Self {
            identity: IdentityResolver::new(peer),
            tokens,
            partition_prefix: partition_prefix.into(),
        }
    }

    /// Identity resolver in use.
    pub fn identity(&self) -> &IdentityResolver<P> {
        &self.identity
    }

    /// Partition of `org` under this engine's naming.
    #[must_use]
    pub fn partition_of(&self, org: &OrgId) -> PartitionName {
        partition_for(&self.partition_prefix, org)
    }

    /// Create an asset in the caller's own partition.
    pub fn create<C: InvocationContext>(
        &self,
        ctx: &C,
        input: AssetInput,
    ) -> Result<Asset, RegistryError> {
        let input = validate_asset_input(input)?;
        let (caller, partition) = self.identity.caller_partition(ctx, &self.partition_prefix)?;

        if input.owner != caller {
            return Err(AuthorizationError::ForeignOwner {
                caller_org: caller.to_string(),
                owner_org: input.owner.to_string(),
            }
            .into());
        }

        let (asset_id, asset_key) = new_asset_identity(
            &input.object_type,
            self.tokens.new_unique_token(),
            self.tokens.freshness(),
        );

        let stub = ctx.stub();
        if stub.get_private_data(&partition, &asset_key)?.is_some() {
            warn!(collection = %partition, asset_key = %asset_key, "Generated key already in use");
            return Err(StorageError::KeyCollision {
                partition: partition.to_string(),
                key: asset_key.to_string(),
            }
            .into());
        }

        let asset = Asset {
            object_type: input.object_type,
            asset_key,
            asset_id,
            prev_asset_id: input.prev_asset_id,
            asset: input.asset,
            qty: input.qty,
            owner: input.owner,
            active: AssetStatus::Active,
            version: 0,
        };

        stub.put_private_data(&partition, &asset.asset_key, &encode(&asset)?)?;
        log_asset_event!(debug, "Put asset", partition, asset.asset_key, owner = %asset.owner);

        self.install_record_policy(stub, &partition, &asset.asset_key, &caller)?;
        self.point_marker(stub, &asset.asset_key, &caller)?;

        log_asset_event!(info, "Asset issued", partition, asset.asset_key, owner = %caller);
        Ok(asset)
    }

    /// Read `asset_key` from the caller's own partition.
    pub fn read<C: InvocationContext>(
        &self,
        ctx: &C,
        asset_key: &AssetKey,
    ) -> Result<Option<Asset>, RegistryError> {
        let (_, partition) = self.identity.caller_partition(ctx, &self.partition_prefix)?;
        let Some(bytes) = ctx.stub().get_private_data(&partition, asset_key)? else {
            debug!(collection = %partition, asset_key = %asset_key, "Asset not held by caller");
            return Ok(None);
        };
        decode_record(&partition, asset_key, &bytes).map(Some)
    }

    /// Resolve the owner of `asset_key` from the public marker.
    pub fn locate<C: InvocationContext>(
        &self,
        ctx: &C,
        asset_key: &AssetKey,
    ) -> Result<Option<AssetLocation>, RegistryError> {
        self.identity.resolve_caller_org(ctx)?;
        let Some(marker) = read_marker(ctx.stub(), asset_key)? else {
            return Ok(None);
        };
        Ok(Some(AssetLocation {
            partition: self.partition_of(&marker.owner),
            owner: marker.owner,
        }))
    }

    /// Move an asset to `buyer_org`.
    ///
    /// Returns the record as it now stands. Transferring to the current
    /// owner leaves owner, version and policy as they were.
    pub fn transfer<C: InvocationContext>(
        &self,
        ctx: &C,
        snapshot: &Asset,
        buyer_org: &str,
    ) -> Result<Asset, RegistryError> {
        validate_transfer_snapshot(snapshot)?;
        let buyer = validate_buyer_org(buyer_org)?;

        let caller = self.identity.resolve_caller_org(ctx)?;
        if caller != snapshot.owner {
            return Err(not_owner(&caller, &snapshot.owner));
        }
        self.identity.verify_caller_matches_executor(&caller)?;

        let stub = ctx.stub();
        let asset_key = &snapshot.asset_key;
        let marker = read_marker(stub, asset_key)?.ok_or_else(|| unknown(asset_key))?;
        if marker.owner != caller {
            return Err(not_owner(&caller, &marker.owner));
        }

        let seller_partition = self.partition_of(&caller);
        let bytes = stub
            .get_private_data(&seller_partition, asset_key)?
            .ok_or_else(|| unknown(asset_key))?;
        let stored = decode_record(&seller_partition, asset_key, &bytes)?;
        if !check_placement_invariant(&stored, &caller, asset_key) {
            return Err(StorageError::Corrupted {
                partition: seller_partition.to_string(),
                key: asset_key.to_string(),
                reason: format!("record names owner {}", stored.owner),
            }
            .into());
        }
        check_snapshot_matches(snapshot, &stored)?;

        if buyer == caller {
            stub.put_private_data(&seller_partition, asset_key, &bytes)?;
            self.install_record_policy(stub, &seller_partition, asset_key, &caller)?;
            log_asset_event!(info, "Self-transfer, nothing moved", seller_partition, asset_key, owner = %caller);
            return Ok(stored);
        }

        let updated = stored.transferred_to(buyer.clone());
        let buyer_partition = self.partition_of(&buyer);

        stub.put_private_data(&buyer_partition, asset_key, &encode(&updated)?)?;
        log_asset_event!(debug, "Put asset", buyer_partition, asset_key, owner = %buyer);
        self.install_record_policy(stub, &buyer_partition, asset_key, &buyer)?;

        stub.del_private_data(&seller_partition, asset_key)?;
        log_asset_event!(debug, "Deleted seller copy", seller_partition, asset_key);

        self.point_marker(stub, asset_key, &buyer)?;

        info!(
            asset_key = %asset_key,
            caller_org = %caller,
            buyer_org = %buyer,
            version = updated.version,
            "Asset transferred"
        );
        Ok(updated)
    }

    fn install_record_policy<S: PrivateDataStore + ?Sized>(
        &self,
        stub: &S,
        partition: &PartitionName,
        key: &AssetKey,
        org: &OrgId,
    ) -> Result<(), StorageError> {
        set_write_endorsers(stub, partition, key, [org])
            .map_err(|e| StorageError::policy(partition.as_str(), key.as_str(), e))?;
        log_asset_event!(debug, "Endorsement policy installed", partition, key, endorsing_org = %org);
        Ok(())
    }

    fn point_marker<S: PublicStateStore + ?Sized>(
        &self,
        stub: &S,
        asset_key: &AssetKey,
        owner: &OrgId,
    ) -> Result<(), StorageError> {
        let state_key = OwnershipMarker::state_key(asset_key);
        let marker = OwnershipMarker::new(owner.clone());
        let bytes =
            serde_json::to_vec(&marker).map_err(|e| StorageError::Serialization(e.to_string()))?;
        stub.put_state(&state_key, &bytes)?;
        set_state_endorsers(stub, &state_key, [owner])
            .map_err(|e| StorageError::policy(PUBLIC_STATE, state_key.as_str(), e))?;
        debug!(state_key = %state_key, owner = %owner, "Ownership marker updated");
        Ok(())
    }
}

fn encode(asset: &Asset) -> Result<Vec<u8>, StorageError> {
    serde_json::to_vec(asset).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn decode_record(
    partition: &PartitionName,
    key: &AssetKey,
    bytes: &[u8],
) -> Result<Asset, RegistryError> {
    serde_json::from_slice(bytes).map_err(|e| {
        StorageError::Corrupted {
            partition: partition.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn read_marker<S: PublicStateStore + ?Sized>(
    stub: &S,
    asset_key: &AssetKey,
) -> Result<Option<OwnershipMarker>, StorageError> {
    let state_key = OwnershipMarker::state_key(asset_key);
    stub.get_state(&state_key)?
        .map(|bytes| {
            serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupted {
                partition: PUBLIC_STATE.to_string(),
                key: state_key.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn not_owner(caller: &OrgId, owner: &OrgId) -> RegistryError {
    warn!(caller_org = %caller, owner_org = %owner, "Transfer attempted by non-owner");
    AuthorizationError::NotOwner {
        caller_org: caller.to_string(),
        owner_org: owner.to_string(),
    }
    .into()
}

fn unknown(asset_key: &AssetKey) -> RegistryError {
    ValidationError::UnknownAsset {
        asset_key: asset_key.to_string(),
    }
    .into()
}

// =============================================================================
// TESTS
// =============================================================================
