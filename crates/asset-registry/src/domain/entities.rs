//! # Core Domain Entities
//!
//! The asset record as persisted in a private partition, the input accepted
//! when issuing one, and the public marker recording who owns it.

use crate::domain::value_objects::{AssetId, AssetKey, OrgId, PartitionName};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

// =============================================================================
// ASSET
// =============================================================================

/// Lifecycle flag of an asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Live asset.
    #[serde(rename = "A")]
    Active,
}

/// An asset record.
///
/// Field names are fixed for interoperability with other readers of the
/// private partitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset category; namespace of the storage key.
    #[serde(rename = "objectType")]
    pub object_type: String,
    /// Storage key, assigned at creation and carried across transfers.
    #[serde(rename = "assetKey")]
    pub asset_key: AssetKey,
    /// Permanent identity.
    #[serde(rename = "assetID")]
    pub asset_id: AssetId,
    /// Record this one supersedes or derives from.
    #[serde(
        rename = "prevAssetID",
        default,
        deserialize_with = "empty_as_none",
        serialize_with = "none_as_empty"
    )]
    pub prev_asset_id: Option<String>,
    /// Descriptive payload.
    pub asset: String,
    /// Quantity, strictly positive.
    pub qty: f64,
    /// Organization allowed to mutate or transfer the asset.
    pub owner: OrgId,
    /// Lifecycle flag.
    pub active: AssetStatus,
    /// Bumped on every accepted ownership change.
    pub version: u64,
}

impl Asset {
    /// The record after handing it to `buyer`.
    #[must_use]
    pub fn transferred_to(&self, buyer: OrgId) -> Self {
        Self {
            owner: buyer,
            version: self.version + 1,
            ..self.clone()
        }
    }
}

// =============================================================================
// ISSUE INPUT
// =============================================================================

/// Caller-supplied properties of an asset to issue.
///
/// Every field defaults so that a missing field is reported by validation,
/// naming the field, rather than as a decoding failure.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AssetInput {
    /// Asset category.
    #[serde(rename = "objectType", default)]
    pub object_type: String,
    /// Optional provenance link.
    #[serde(rename = "prevAssetID", default, deserialize_with = "empty_as_none")]
    pub prev_asset_id: Option<String>,
    /// Descriptive payload.
    #[serde(default)]
    pub asset: String,
    /// Quantity.
    #[serde(default)]
    pub qty: f64,
    /// Intended owner.
    #[serde(default)]
    pub owner: String,
}

// =============================================================================
// OWNERSHIP MARKER (PUBLIC STATE)
// =============================================================================

/// Object type written into every ownership marker.
pub const OWNERSHIP_MARKER_TYPE: &str = "assetOwnership";

/// Public record naming the org that owns an asset.
///
/// Keyed by a digest of the asset key so the key itself, which embeds the
/// type and identity, stays out of public state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipMarker {
    /// Always [`OWNERSHIP_MARKER_TYPE`].
    #[serde(rename = "objectType")]
    pub object_type: String,
    /// Current owner.
    pub owner: OrgId,
}

impl OwnershipMarker {
    /// Marker for `owner`.
    #[must_use]
    pub fn new(owner: OrgId) -> Self {
        Self {
            object_type: OWNERSHIP_MARKER_TYPE.to_string(),
            owner,
        }
    }

    /// Public state key of the marker for `asset_key`.
    #[must_use]
    pub fn state_key(asset_key: &AssetKey) -> String {
        let digest = Sha256::digest(asset_key.as_str().as_bytes());
        format!("{OWNERSHIP_MARKER_TYPE}~{}", hex::encode(digest))
    }
}

/// Where an asset's authoritative record lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLocation {
    /// Current owner.
    pub owner: OrgId,
    /// Owner's private partition.
    pub partition: PartitionName,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn none_as_empty<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

// =============================================================================
// TESTS
// =============================================================================
