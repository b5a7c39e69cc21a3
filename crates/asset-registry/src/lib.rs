//! # Asset Registry - Confidential Asset Registry Core
//!
//! Shared registry of assets for mutually-distrusting organizations. Each
//! organization keeps full asset records in its own private partition; a
//! compact public marker records only which organization owns which asset.
//!
//! ## Purpose
//!
//! Issues assets into the caller's partition and transfers them between
//! organizations. A transfer relocates the record into the buyer's partition,
//! keeps its permanent identity, and re-points the record's write-endorsement
//! policy so that only the buyer can mutate or re-transfer it.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Owner is the org whose partition holds the record | `engine.rs` - `create()`, `transfer()` |
//! | Only the owner's org may endorse writes to the record | `policy.rs` - `set_write_endorsers()` |
//! | Caller org equals executing peer org | `identity.rs` - `verify_caller_matches_executor()` |
//! | `assetID` never changes across transfers | `domain/entities.rs` - `Asset::transferred_to()` |
//! | Keys never derive from caller-mutable fields | `domain/services.rs` - `new_asset_identity()` |
//! | Positive quantity, non-empty fields | `domain/invariants.rs` - `validate_asset_input()` |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Identity Resolver | `identity.rs` | Caller org, anti-spoofing check |
//! | Partition Namer | `domain/services.rs` | `partition_for()` |
//! | Asset Key Generator | `domain/services.rs` | `new_asset_identity()` |
//! | Authorization Policy Manager | `policy.rs` | Key-level endorsement policies |
//! | Asset Lifecycle Engine | `engine.rs` | Create, read, locate, transfer |
//! | Request Adapter | `service.rs` | Transient input, encoding, telemetry |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `PrivateDataStore` | Private partition records and their policies |
//! | `PublicStateStore` | Ownership markers and their policies |
//! | `TransientInput` | Confidential invocation arguments |
//! | `ClientIdentity` / `PeerIdentity` | Caller and executor orgs |
//! | `TokenGenerator` | Random tokens and freshness values |
//!
//! ## Usage Example
//!
//! ```ignore
//! use asset_registry::prelude::*;
//!
//! let ledger = InMemoryLedger::new();
//! let service = create_test_service("Org1MSP");
//!
//! let tx = ledger.begin(
//!     Invocation::new("Org1MSP", "Org1MSP")
//!         .with_transient("asset_properties", r#"{"objectType":"widget","asset":"blue widget","qty":5,"owner":"Org1MSP"}"#),
//! );
//! let asset_json = service.issue_asset(&tx)?;
//! tx.commit()?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod identity;
pub mod policy;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Asset, AssetInput, AssetLocation, AssetStatus, OwnershipMarker,
    };

    // Value objects
    pub use crate::domain::value_objects::{AssetId, AssetKey, OrgId, PartitionName};

    // Policy
    pub use crate::domain::policy::{EndorsementPolicy, PolicyPrincipal, PrincipalRole};

    // Domain services
    pub use crate::domain::services::{new_asset_identity, partition_for};

    // Ports
    pub use crate::ports::inbound::{functions, AssetRegistryApi};
    pub use crate::ports::outbound::{
        ClientIdentity, InvocationContext, LedgerStub, PeerIdentity, PrivateDataStore,
        PublicStateStore, TokenGenerator, TransientInput,
    };

    // Errors
    pub use crate::errors::{
        AuthorizationError, IdentityError, InvocationError, PolicyError, RegistryError,
        StorageError, ValidationError,
    };

    // Adapters
    pub use crate::adapters::{
        EnvPeerIdentity, FixedTokenGenerator, InMemoryLedger, Invocation, LedgerTransaction,
        RandomTokenGenerator, StaticClientIdentity, StaticPeerIdentity,
    };

    // Core
    pub use crate::config::RegistryConfig;
    pub use crate::engine::AssetLifecycleEngine;
    pub use crate::identity::IdentityResolver;
    pub use crate::service::{create_test_service, AssetRegistryService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
