//! # Driving Ports (API - Inbound)
//!
//! Invocation surface of the registry. Every function reads its confidential
//! arguments from the invocation's transient input.

use crate::domain::entities::AssetLocation;
use crate::errors::InvocationError;
use crate::ports::outbound::InvocationContext;

/// Function names as seen by submitting clients.
pub mod functions {
    /// Issue a new asset from `asset_properties`.
    pub const ISSUE_ASSET: &str = "IssueAsset";
    /// Transfer the asset in `asset_transfer` to `buyer_org`.
    pub const TRANSFER_ASSET: &str = "TransferAsset";
    /// Read an asset from the caller's partition.
    pub const READ_ASSET: &str = "ReadAsset";
    /// Resolve the current owner of an asset key.
    pub const LOCATE_ASSET: &str = "LocateAsset";
}

/// Primary API of the asset registry.
pub trait AssetRegistryApi {
    /// Create an asset in the caller's partition.
    ///
    /// Reads confidential field `asset_properties`. Returns the persisted
    /// record as JSON.
    fn issue_asset<C: InvocationContext>(&self, ctx: &C) -> Result<Vec<u8>, InvocationError>;

    /// Transfer an asset to another organization.
    ///
    /// Reads confidential fields `asset_transfer` and `buyer_org`. Only the
    /// current owner may call this.
    fn transfer_asset<C: InvocationContext>(&self, ctx: &C) -> Result<(), InvocationError>;

    /// Read an asset held in the caller's own partition. Returns the record
    /// as JSON, or `None` if the caller holds no record under `asset_key`.
    fn read_asset<C: InvocationContext>(
        &self,
        ctx: &C,
        asset_key: &str,
    ) -> Result<Option<Vec<u8>>, InvocationError>;

    /// Resolve the owner and partition of `asset_key` from public state.
    fn locate_asset<C: InvocationContext>(
        &self,
        ctx: &C,
        asset_key: &str,
    ) -> Result<Option<AssetLocation>, InvocationError>;
}
