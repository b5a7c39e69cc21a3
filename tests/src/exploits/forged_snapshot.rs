//! # Forged Transfer Snapshots
//!
//! The transfer snapshot arrives from the caller. Nothing in it is trusted
//! until it is checked against public and private state.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use asset_registry::prelude::*;

    #[test]
    fn test_claimed_ownership_rejected() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();

        let mut forged = asset.clone();
        forged.owner = OrgId::parse("Org2MSP").unwrap();
        let service = create_test_service("Org2MSP");
        let tx = ledger.begin(transfer_invocation("Org2MSP", "Org2MSP", &forged, "Org2MSP"));
        let err = service.transfer_asset(&tx).unwrap_err();

        assert_eq!(
            err.source,
            RegistryError::Authorization(AuthorizationError::NotOwner {
                caller_org: "Org2MSP".to_string(),
                owner_org: "Org1MSP".to_string(),
            })
        );
        drop(tx);
        assert_eq!(read_as(&ledger, "Org1MSP", &asset.asset_key), Some(asset));
    }

    #[test]
    fn test_inflated_quantity_rejected() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();

        let mut inflated = asset;
        inflated.qty = 5_000.0;
        let service = create_test_service("Org1MSP");
        let tx = ledger.begin(transfer_invocation("Org1MSP", "Org1MSP", &inflated, "Org2MSP"));
        let err = service.transfer_asset(&tx).unwrap_err();

        assert_eq!(
            err.source,
            RegistryError::Validation(ValidationError::StaleSnapshot { field: "qty" })
        );
    }

    #[test]
    fn test_swapped_identity_rejected() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();
        let other = issue_widget(&ledger, "Org1MSP").unwrap();

        // Key of one asset, identity of another.
        let mut swapped = asset;
        swapped.asset_id = other.asset_id;
        let service = create_test_service("Org1MSP");
        let tx = ledger.begin(transfer_invocation("Org1MSP", "Org1MSP", &swapped, "Org2MSP"));
        let err = service.transfer_asset(&tx).unwrap_err();

        assert_eq!(
            err.source,
            RegistryError::Validation(ValidationError::StaleSnapshot { field: "assetID" })
        );
    }

    #[test]
    fn test_replayed_snapshot_after_round_trip_rejected() {
        let ledger = InMemoryLedger::new();
        let original = issue_widget(&ledger, "Org1MSP").unwrap();

        transfer_and_commit(&ledger, "Org1MSP", &original, "Org2MSP").unwrap();
        let at_org2 = read_as(&ledger, "Org2MSP", &original.asset_key).unwrap();
        transfer_and_commit(&ledger, "Org2MSP", &at_org2, "Org1MSP").unwrap();

        // Org1 owns it again, but the version-0 snapshot is out of date.
        let service = create_test_service("Org1MSP");
        let tx = ledger.begin(transfer_invocation("Org1MSP", "Org1MSP", &original, "Org3MSP"));
        let err = service.transfer_asset(&tx).unwrap_err();
        assert_eq!(
            err.source,
            RegistryError::Validation(ValidationError::StaleSnapshot { field: "version" })
        );

        let current = read_as(&ledger, "Org1MSP", &original.asset_key).unwrap();
        assert_eq!(current.version, 2);
        transfer_and_commit(&ledger, "Org1MSP", &current, "Org3MSP").unwrap();
    }

    #[test]
    fn test_unknown_key_rejected() {
        let ledger = InMemoryLedger::new();
        let mut asset = issue_widget(&ledger, "Org1MSP").unwrap();
        asset.asset_key = AssetKey::new("widget_does-not-exist");

        let service = create_test_service("Org1MSP");
        let tx = ledger.begin(transfer_invocation("Org1MSP", "Org1MSP", &asset, "Org2MSP"));
        let err = service.transfer_asset(&tx).unwrap_err();
        assert!(matches!(
            err.source,
            RegistryError::Validation(ValidationError::UnknownAsset { .. })
        ));
    }

    #[test]
    fn test_malformed_snapshot_rejected() {
        let ledger = InMemoryLedger::new();
        let service = create_test_service("Org1MSP");
        let tx = ledger.begin(
            Invocation::new("Org1MSP", "Org1MSP")
                .with_transient("asset_transfer", r#"{"assetKey":"widget_1"}"#)
                .with_transient("buyer_org", "Org2MSP"),
        );
        let err = service.transfer_asset(&tx).unwrap_err();
        assert!(matches!(
            err.source,
            RegistryError::Validation(ValidationError::MalformedPayload {
                payload: "asset transfer",
                ..
            })
        ));
    }
}
