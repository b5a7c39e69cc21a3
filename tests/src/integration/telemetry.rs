//! # Invocation Telemetry
//!
//! Metrics are process-global and tests run in parallel, so assertions
//! compare lower bounds.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use asset_registry::prelude::*;
    use registry_telemetry::{ASSETS_ISSUED, ASSETS_TRANSFERRED, INVOCATIONS};

    fn invocations(function: &str, outcome: &str) -> f64 {
        INVOCATIONS.with_label_values(&[function, outcome]).get()
    }

    #[test]
    fn test_outcomes_labelled_by_error_kind() {
        let ledger = InMemoryLedger::new();
        let service = create_test_service("Org1MSP");
        let before_ok = invocations(functions::ISSUE_ASSET, "ok");
        let before_auth = invocations(functions::ISSUE_ASSET, "authorization");
        let before_validation = invocations(functions::ISSUE_ASSET, "validation");

        let tx = ledger.begin(issue_invocation("Org1MSP", "Org1MSP", &widget_json("Org1MSP")));
        service.issue_asset(&tx).unwrap();
        let tx = ledger.begin(issue_invocation("Org2MSP", "Org1MSP", &widget_json("Org2MSP")));
        service.issue_asset(&tx).unwrap_err();
        let tx = ledger.begin(Invocation::new("Org1MSP", "Org1MSP"));
        service.issue_asset(&tx).unwrap_err();

        assert!(invocations(functions::ISSUE_ASSET, "ok") >= before_ok + 1.0);
        assert!(invocations(functions::ISSUE_ASSET, "authorization") >= before_auth + 1.0);
        assert!(invocations(functions::ISSUE_ASSET, "validation") >= before_validation + 1.0);

        let stats = service.stats();
        assert_eq!(stats.invocations, 3);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.assets_issued, 1);
    }

    #[test]
    fn test_asset_counters_advance() {
        let issued_before = ASSETS_ISSUED.get();
        let transferred_before = ASSETS_TRANSFERRED.get();

        let ledger = InMemoryLedger::new();
        let asset = issue_widget(&ledger, "Org1MSP").unwrap();
        transfer_and_commit(&ledger, "Org1MSP", &asset, "Org2MSP").unwrap();

        assert!(ASSETS_ISSUED.get() >= issued_before + 1.0);
        assert!(ASSETS_TRANSFERRED.get() >= transferred_before + 1.0);
    }

    #[test]
    fn test_exposition_names_registry_metrics() {
        registry_telemetry::record_invocation(
            functions::LOCATE_ASSET,
            "ok",
            std::time::Duration::from_micros(10),
        );
        let text = match registry_telemetry::register_metrics() {
            Ok(handle) => handle.gather().unwrap(),
            Err(_) => registry_telemetry::encode_metrics().unwrap(),
        };
        assert!(text.contains("ar_invocations_total"));
        assert!(text.contains("ar_assets_issued_total"));
    }
}
