//! # Domain Services
//!
//! Stateless functions: partition naming and asset identity composition.

use crate::domain::value_objects::{AssetId, AssetKey, OrgId, PartitionName};
use uuid::Uuid;

/// Separator between the components of an asset key.
pub const KEY_SEPARATOR: char = '_';

/// Name of `org`'s exclusive private partition.
///
/// Pure and deterministic; distinct orgs always map to distinct partitions.
#[must_use]
pub fn partition_for(prefix: &str, org: &OrgId) -> PartitionName {
    PartitionName::new(format!("{prefix}{org}"))
}

/// Derive a new asset identity from a fresh random token.
///
/// The key is `<type>_<assetID>_<freshness>`. It is built only from the type
/// and generator output, never from mutable caller fields, so a caller cannot
/// aim a new record at an existing key.
#[must_use]
pub fn new_asset_identity(asset_type: &str, token: Uuid, freshness: u64) -> (AssetId, AssetKey) {
    let asset_id = AssetId::from_token(token);
    let key = AssetKey::new(format!(
        "{asset_type}{KEY_SEPARATOR}{asset_id}{KEY_SEPARATOR}{freshness}"
    ));
    (asset_id, key)
}
