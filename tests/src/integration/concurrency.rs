//! # Concurrent Invocations
//!
//! The registry takes no locks of its own. Conflicting invocations are
//! resolved by the ledger's read-version checks at commit.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use asset_registry::prelude::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_conflicting_transfers_only_one_commits() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();
        let service = create_test_service("Org1MSP");

        let to_org2 = ledger.begin(transfer_invocation("Org1MSP", "Org1MSP", &asset, "Org2MSP"));
        let to_org3 = ledger.begin(transfer_invocation("Org1MSP", "Org1MSP", &asset, "Org3MSP"));
        service.transfer_asset(&to_org2).unwrap();
        service.transfer_asset(&to_org3).unwrap();

        to_org2.commit().unwrap();
        let err = to_org3.commit().unwrap_err();
        assert!(matches!(err, StorageError::MvccConflict { .. }));

        // Counters record executions; the aborted commit is still counted.
        assert_eq!(service.stats().assets_transferred, 2);

        assert!(read_as(&ledger, "Org2MSP", &asset.asset_key).is_some());
        assert!(read_as(&ledger, "Org3MSP", &asset.asset_key).is_none());
        assert_eq!(
            record_endorsers(&ledger, "Org2MSP", &asset.asset_key),
            vec!["Org2MSP"]
        );
    }

    #[test]
    fn test_threaded_transfers_race() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();
        let service = create_test_service("Org1MSP");
        let buyers = ["Org2MSP", "Org3MSP", "Org4MSP", "Org5MSP"];
        let barrier = Barrier::new(buyers.len());

        let outcomes: Vec<bool> = thread::scope(|s| {
            let handles: Vec<_> = buyers
                .iter()
                .map(|buyer| {
                    let (ledger, service, barrier, asset) = (&ledger, &service, &barrier, &asset);
                    s.spawn(move || {
                        let tx = ledger.begin(transfer_invocation(
                            "Org1MSP", "Org1MSP", asset, buyer,
                        ));
                        let executed = service.transfer_asset(&tx).is_ok();
                        // Every transfer has read its inputs before any commits.
                        barrier.wait();
                        executed && tx.commit().is_ok()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        let holders: Vec<_> = buyers
            .iter()
            .filter(|buyer| read_as(&ledger, buyer, &asset.asset_key).is_some())
            .collect();
        assert_eq!(holders.len(), 1);
    }

    #[test]
    fn test_independent_assets_commit_in_parallel() {
        let ledger = InMemoryLedger::new();
        let orgs = ["Org1MSP", "Org2MSP", "Org3MSP"];

        let issued: Vec<Asset> = thread::scope(|s| {
            let handles: Vec<_> = orgs
                .iter()
                .map(|org| {
                    let ledger = &ledger;
                    s.spawn(move || issue_widget(ledger, org).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (org, asset) in orgs.iter().zip(&issued) {
            assert_eq!(read_as(&ledger, org, &asset.asset_key).as_ref(), Some(asset));
        }
    }

    #[test]
    fn test_stale_reader_of_marker_conflicts() {
        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();

        // A locate observes the marker, then a transfer moves the asset.
        let service = create_test_service("Org2MSP");
        let locate = ledger.begin(Invocation::new("Org2MSP", "Org2MSP"));
        service
            .locate_asset(&locate, asset.asset_key.as_str())
            .unwrap();

        transfer_and_commit(&ledger, "Org1MSP", &asset, "Org2MSP").unwrap();

        assert!(matches!(
            locate.commit(),
            Err(StorageError::MvccConflict { .. })
        ));
    }
}
