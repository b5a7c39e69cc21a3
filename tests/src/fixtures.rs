//! Shared helpers for invoking the registry as a given org.

use asset_registry::config::{ASSET_PROPERTIES_FIELD, ASSET_TRANSFER_FIELD, BUYER_ORG_FIELD};
use asset_registry::prelude::*;

/// `IssueAsset` payload for a widget owned by `owner`.
pub fn widget_json(owner: &str) -> String {
    format!(r#"{{"objectType":"widget","asset":"blue widget","qty":5,"owner":"{owner}"}}"#)
}

/// Invocation carrying `IssueAsset` input.
pub fn issue_invocation(client_org: &str, peer_org: &str, payload: &str) -> Invocation {
    Invocation::new(client_org, peer_org).with_transient(ASSET_PROPERTIES_FIELD, payload)
}

/// Invocation carrying `TransferAsset` input.
pub fn transfer_invocation(
    client_org: &str,
    peer_org: &str,
    snapshot: &Asset,
    buyer_org: &str,
) -> Invocation {
    let snapshot = serde_json::to_vec(snapshot).unwrap_or_default();
    Invocation::new(client_org, peer_org)
        .with_transient(ASSET_TRANSFER_FIELD, snapshot)
        .with_transient(BUYER_ORG_FIELD, buyer_org)
}

/// Issue and commit a widget as `org` on its own peer.
pub fn issue_widget(ledger: &InMemoryLedger, org: &str) -> Result<Asset, String> {
    let service = create_test_service(org);
    let tx = ledger.begin(issue_invocation(org, org, &widget_json(org)));
    let bytes = service.issue_asset(&tx).map_err(|e| e.to_string())?;
    tx.commit().map_err(|e| e.to_string())?;
    serde_json::from_slice(&bytes).map_err(|e| e.to_string())
}

/// Transfer `snapshot` to `buyer` as `seller` on its own peer, then commit.
pub fn transfer_and_commit(
    ledger: &InMemoryLedger,
    seller: &str,
    snapshot: &Asset,
    buyer: &str,
) -> Result<(), String> {
    let service = create_test_service(seller);
    let tx = ledger.begin(transfer_invocation(seller, seller, snapshot, buyer));
    service.transfer_asset(&tx).map_err(|e| e.to_string())?;
    tx.commit().map_err(|e| e.to_string())
}

/// Read `key` from `org`'s partition as `org`.
pub fn read_as(ledger: &InMemoryLedger, org: &str, key: &AssetKey) -> Option<Asset> {
    let service = create_test_service(org);
    let tx = ledger.begin(Invocation::new(org, org));
    service
        .read_asset(&tx, key.as_str())
        .ok()
        .flatten()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
}

/// Orgs named by the policy installed on `key` in `org`'s partition.
pub fn record_endorsers(ledger: &InMemoryLedger, org: &str, key: &AssetKey) -> Vec<String> {
    let partition = PartitionName::new(format!("_implicit_org_{org}"));
    ledger
        .private_validation_parameter(&partition, key)
        .and_then(|bytes| EndorsementPolicy::from_bytes(&bytes).ok())
        .map(|policy| policy.list_orgs().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}
