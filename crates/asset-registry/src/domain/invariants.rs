//! # Domain Invariants
//!
//! Checks that must pass before anything is written.
//!
//! - Issue input: non-empty type, payload and owner; strictly positive qty
//! - Transfer snapshot: must restate the stored record exactly
//! - Placement: a record's owner is the org whose partition holds it

use crate::domain::entities::{Asset, AssetInput};
use crate::domain::value_objects::{AssetKey, OrgId};
use crate::errors::ValidationError;

/// An [`AssetInput`] that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedInput {
    /// Asset category.
    pub object_type: String,
    /// Provenance link.
    pub prev_asset_id: Option<String>,
    /// Descriptive payload.
    pub asset: String,
    /// Strictly positive quantity.
    pub qty: f64,
    /// Intended owner.
    pub owner: OrgId,
}

/// Validate issue input, naming the first offending field.
pub fn validate_asset_input(input: AssetInput) -> Result<ValidatedInput, ValidationError> {
    if input.object_type.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "objectType",
        });
    }
    if input.asset.is_empty() {
        return Err(ValidationError::EmptyField { field: "asset" });
    }
    if !input.qty.is_finite() || input.qty <= 0.0 {
        return Err(ValidationError::NonPositiveQuantity { qty: input.qty });
    }
    if input.owner.is_empty() {
        return Err(ValidationError::EmptyField { field: "owner" });
    }
    let owner = OrgId::parse(input.owner.as_str()).map_err(|_| ValidationError::InvalidOrg {
        field: "owner",
        value: input.owner.clone(),
    })?;

    Ok(ValidatedInput {
        object_type: input.object_type,
        prev_asset_id: input.prev_asset_id,
        asset: input.asset,
        qty: input.qty,
        owner,
    })
}

/// Parse the buyer org of a transfer.
pub fn validate_buyer_org(buyer_org: &str) -> Result<OrgId, ValidationError> {
    if buyer_org.is_empty() {
        return Err(ValidationError::EmptyField { field: "buyer_org" });
    }
    OrgId::parse(buyer_org).map_err(|_| ValidationError::InvalidOrg {
        field: "buyer_org",
        value: buyer_org.to_string(),
    })
}

/// Shape checks on a transfer snapshot that serde cannot express.
pub fn validate_transfer_snapshot(snapshot: &Asset) -> Result<(), ValidationError> {
    if snapshot.asset_key.is_empty() {
        return Err(ValidationError::EmptyField { field: "assetKey" });
    }
    if snapshot.object_type.is_empty() {
        return Err(ValidationError::EmptyField {
            field: "objectType",
        });
    }
    Ok(())
}

/// Confirm a caller-submitted snapshot restates the stored record.
///
/// Returns the first differing field. `version` is compared too, so a
/// snapshot taken before a concurrent transfer is rejected.
pub fn check_snapshot_matches(snapshot: &Asset, stored: &Asset) -> Result<(), ValidationError> {
    let mismatch = if snapshot.asset_id != stored.asset_id {
        Some("assetID")
    } else if snapshot.object_type != stored.object_type {
        Some("objectType")
    } else if snapshot.asset != stored.asset {
        Some("asset")
    } else if snapshot.qty.to_bits() != stored.qty.to_bits() {
        Some("qty")
    } else if snapshot.owner != stored.owner {
        Some("owner")
    } else if snapshot.version != stored.version {
        Some("version")
    } else {
        None
    };
    match mismatch {
        Some(field) => Err(ValidationError::StaleSnapshot { field }),
        None => Ok(()),
    }
}

/// A record read from `holder`'s partition under `key` must carry that key
/// and name `holder` as owner.
#[must_use]
pub fn check_placement_invariant(record: &Asset, holder: &OrgId, key: &AssetKey) -> bool {
    &record.owner == holder && &record.asset_key == key
}

// =============================================================================
// TESTS
// =============================================================================
