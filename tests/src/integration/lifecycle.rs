//! # Asset Lifecycle Flows
//!
//! Issue by Org1, transfer to Org2, onward transfer to Org3.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use asset_registry::prelude::*;

    const ORG1: &str = "Org1MSP";
    const ORG2: &str = "Org2MSP";
    const ORG3: &str = "Org3MSP";

    #[test]
    fn test_issue_transfer_and_reject_retransfer() {
        let ledger = InMemoryLedger::new();

        // Org1 issues
        let asset = issue_widget(&ledger, ORG1).unwrap();
        assert!(asset.asset_key.as_str().starts_with("widget_"));
        assert_eq!(asset.owner.as_str(), ORG1);
        assert_eq!(asset.version, 0);

        // Org1 transfers to Org2
        transfer_and_commit(&ledger, ORG1, &asset, ORG2).unwrap();

        let held = read_as(&ledger, ORG2, &asset.asset_key).unwrap();
        assert_eq!(held.asset_key, asset.asset_key);
        assert_eq!(held.asset_id, asset.asset_id);
        assert_eq!(held.owner.as_str(), ORG2);
        assert_eq!(record_endorsers(&ledger, ORG2, &asset.asset_key), vec![ORG2]);

        // Org1 replays the same call and is no longer the owner
        let service = create_test_service(ORG1);
        let tx = ledger.begin(transfer_invocation(ORG1, ORG1, &asset, ORG2));
        let err = service.transfer_asset(&tx).unwrap_err();
        assert_eq!(err.function, functions::TRANSFER_ASSET);
        assert!(matches!(
            err.source,
            RegistryError::Authorization(AuthorizationError::NotOwner { .. })
        ));
    }

    #[test]
    fn test_seller_copy_removed_after_transfer() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, ORG1).unwrap();
        transfer_and_commit(&ledger, ORG1, &asset, ORG2).unwrap();

        assert_eq!(read_as(&ledger, ORG1, &asset.asset_key), None);
        assert!(ledger
            .private_keys(&PartitionName::new("_implicit_org_Org1MSP"))
            .is_empty());
        assert!(record_endorsers(&ledger, ORG1, &asset.asset_key).is_empty());
    }

    #[test]
    fn test_chain_of_transfers_bumps_version() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, ORG1).unwrap();

        transfer_and_commit(&ledger, ORG1, &asset, ORG2).unwrap();
        let at_org2 = read_as(&ledger, ORG2, &asset.asset_key).unwrap();
        transfer_and_commit(&ledger, ORG2, &at_org2, ORG3).unwrap();
        let at_org3 = read_as(&ledger, ORG3, &asset.asset_key).unwrap();

        assert_eq!(at_org2.version, 1);
        assert_eq!(at_org3.version, 2);
        assert_eq!(at_org3.asset_id, asset.asset_id);
        assert_eq!(record_endorsers(&ledger, ORG3, &asset.asset_key), vec![ORG3]);
        assert_eq!(read_as(&ledger, ORG2, &asset.asset_key), None);
    }

    #[test]
    fn test_locate_tracks_owner_for_every_org() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, ORG1).unwrap();
        transfer_and_commit(&ledger, ORG1, &asset, ORG2).unwrap();

        for org in [ORG1, ORG2, ORG3] {
            let service = create_test_service(org);
            let tx = ledger.begin(Invocation::new(org, org));
            let location = service
                .locate_asset(&tx, asset.asset_key.as_str())
                .unwrap()
                .unwrap();
            assert_eq!(location.owner.as_str(), ORG2);
            assert_eq!(location.partition.as_str(), "_implicit_org_Org2MSP");
        }
    }

    #[test]
    fn test_public_marker_hides_asset_key() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, ORG1).unwrap();

        let marker_key = OwnershipMarker::state_key(&asset.asset_key);
        assert!(!marker_key.contains(asset.asset_key.as_str()));
        let marker = String::from_utf8(ledger.public_state(&marker_key).unwrap()).unwrap();
        assert!(!marker.contains("blue widget"));
        assert!(!marker.contains(&asset.asset_id.to_string()));
    }

    #[test]
    fn test_self_transfer_changes_nothing() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, ORG1).unwrap();
        transfer_and_commit(&ledger, ORG1, &asset, ORG1).unwrap();

        assert_eq!(read_as(&ledger, ORG1, &asset.asset_key), Some(asset.clone()));
        assert_eq!(record_endorsers(&ledger, ORG1, &asset.asset_key), vec![ORG1]);
    }

    #[test]
    fn test_invalid_issue_writes_nothing() {
        let cases = [
            (r#"{"objectType":"","asset":"blue widget","qty":5,"owner":"Org1MSP"}"#, "objectType"),
            (r#"{"objectType":"widget","asset":"","qty":5,"owner":"Org1MSP"}"#, "asset"),
            (r#"{"objectType":"widget","asset":"blue widget","qty":0,"owner":"Org1MSP"}"#, "qty"),
            (r#"{"objectType":"widget","asset":"blue widget","qty":-3,"owner":"Org1MSP"}"#, "qty"),
            (r#"{"objectType":"widget","asset":"blue widget","qty":5,"owner":""}"#, "owner"),
        ];

        for (payload, field) in cases {
            let ledger = InMemoryLedger::new();
            let service = create_test_service(ORG1);
            let tx = ledger.begin(issue_invocation(ORG1, ORG1, payload));

            let err = service.issue_asset(&tx).unwrap_err();
            assert_eq!(err.kind(), "validation", "case {field}");
            assert!(err.to_string().contains(field), "case {field}: {err}");

            tx.commit().unwrap();
            assert!(
                ledger
                    .private_keys(&PartitionName::new("_implicit_org_Org1MSP"))
                    .is_empty(),
                "case {field}"
            );
            assert!(ledger.public_keys().is_empty(), "case {field}");
        }
    }

    #[test]
    fn test_provenance_link_preserved() {
        let ledger = InMemoryLedger::new();
        let service = create_test_service(ORG1);
        let payload = r#"{"objectType":"widget","prevAssetID":"parent-1","asset":"blue widget","qty":2.5,"owner":"Org1MSP"}"#;
        let tx = ledger.begin(issue_invocation(ORG1, ORG1, payload));
        let bytes = service.issue_asset(&tx).unwrap();
        tx.commit().unwrap();

        let asset: Asset = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(asset.prev_asset_id.as_deref(), Some("parent-1"));
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["prevAssetID"], "parent-1");
        assert_eq!(asset.qty, 2.5);

        transfer_and_commit(&ledger, ORG1, &asset, ORG2).unwrap();
        let held = read_as(&ledger, ORG2, &asset.asset_key).unwrap();
        assert_eq!(held.prev_asset_id.as_deref(), Some("parent-1"));
    }
}
