//! # Asset Registry Service
//!
//! Request adapter. Reads confidential input from the transient map, decodes
//! it, calls the lifecycle engine, encodes the result and records telemetry.
//! Every failure leaves tagged with the invoked function name.

use crate::adapters::{EnvPeerIdentity, RandomTokenGenerator, StaticPeerIdentity};
use crate::config::{ConfigError, RegistryConfig};
use crate::domain::entities::{Asset, AssetInput, AssetLocation};
use crate::domain::value_objects::AssetKey;
use crate::engine::AssetLifecycleEngine;
use crate::errors::{InvocationError, RegistryError, StorageError, ValidationError};
use crate::ports::inbound::{functions, AssetRegistryApi};
use crate::ports::outbound::{InvocationContext, PeerIdentity, TokenGenerator, TransientInput};
use parking_lot::RwLock;
use registry_telemetry::{record_invocation, ASSETS_ISSUED, ASSETS_TRANSFERRED};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Invocation counters of one service instance.
///
/// Counts what the service executed. Whether the ledger later committed the
/// invocation is not visible here.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Invocations handled.
    pub invocations: u64,
    /// Issues executed.
    pub assets_issued: u64,
    /// Transfers to another org executed.
    pub assets_transferred: u64,
    /// Invocations that failed.
    pub failed: u64,
}

/// The asset registry as seen by submitting clients.
pub struct AssetRegistryService<P: PeerIdentity, G: TokenGenerator> {
    config: RegistryConfig,
    engine: AssetLifecycleEngine<P, G>,
    stats: RwLock<ServiceStats>,
}

impl<P: PeerIdentity, G: TokenGenerator> AssetRegistryService<P, G> {
    /// Service executing on `peer`. Rejects unusable configuration.
    pub fn new(config: RegistryConfig, peer: P, tokens: G) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, peer, tokens))
    }

    /// Service with the default configuration.
    pub fn with_defaults(peer: P, tokens: G) -> Self {
        Self::build(RegistryConfig::default(), peer, tokens)
    }

    fn build(config: RegistryConfig, peer: P, tokens: G) -> Self {
        let engine = AssetLifecycleEngine::new(peer, tokens, config.partition_prefix.clone());
        Self {
            config,
            engine,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Underlying lifecycle engine.
    pub fn engine(&self) -> &AssetLifecycleEngine<P, G> {
        &self.engine
    }

    /// Snapshot of the invocation counters.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    fn read_confidential<C: InvocationContext>(
        &self,
        ctx: &C,
        field: &str,
    ) -> Result<Vec<u8>, RegistryError> {
        let bytes = ctx.stub().get_transient(field)?.ok_or_else(|| {
            ValidationError::MissingConfidentialInput {
                field: field.to_string(),
            }
        })?;
        let max = self.config.max_confidential_input_bytes;
        if bytes.len() > max {
            return Err(ValidationError::PayloadTooLarge {
                field: field.to_string(),
                size: bytes.len(),
                max,
            }
            .into());
        }
        debug!(field, size = bytes.len(), "Read confidential input");
        Ok(bytes)
    }

    fn audit_submitter<C: InvocationContext>(&self, ctx: &C) {
        match self.engine.identity().submitting_client_identity(ctx) {
            Ok(client) => debug!(client = %client, "Submitting client"),
            Err(e) => debug!(error = %e, "Submitting client not resolvable"),
        }
    }

    fn issue<C: InvocationContext>(&self, ctx: &C) -> Result<Vec<u8>, RegistryError> {
        let field = &self.config.fields.asset_properties;
        let bytes = self.read_confidential(ctx, field)?;
        let input: AssetInput =
            serde_json::from_slice(&bytes).map_err(|e| ValidationError::MalformedPayload {
                payload: "asset properties",
                reason: e.to_string(),
            })?;
        self.audit_submitter(ctx);

        let asset = self.engine.create(ctx, input)?;
        ASSETS_ISSUED.inc();
        self.stats.write().assets_issued += 1;
        encode(&asset)
    }

    fn transfer<C: InvocationContext>(&self, ctx: &C) -> Result<(), RegistryError> {
        let fields = &self.config.fields;
        let snapshot_bytes = self.read_confidential(ctx, &fields.asset_transfer)?;
        let snapshot: Asset = serde_json::from_slice(&snapshot_bytes).map_err(|e| {
            ValidationError::MalformedPayload {
                payload: "asset transfer",
                reason: e.to_string(),
            }
        })?;
        let buyer_bytes = self.read_confidential(ctx, &fields.buyer_org)?;
        let buyer_org =
            String::from_utf8(buyer_bytes).map_err(|e| ValidationError::MalformedPayload {
                payload: "buyer org",
                reason: e.to_string(),
            })?;
        self.audit_submitter(ctx);

        let updated = self.engine.transfer(ctx, &snapshot, buyer_org.trim())?;
        if updated.owner != snapshot.owner {
            ASSETS_TRANSFERRED.inc();
            self.stats.write().assets_transferred += 1;
        }
        Ok(())
    }

    fn finish<T>(
        &self,
        function: &'static str,
        started: Instant,
        result: Result<T, RegistryError>,
    ) -> Result<T, InvocationError> {
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        record_invocation(function, outcome, started.elapsed());

        let mut stats = self.stats.write();
        stats.invocations += 1;
        match result {
            Ok(value) => Ok(value),
            Err(source) => {
                stats.failed += 1;
                warn!(function, kind = source.kind(), error = %source, "Invocation failed");
                Err(InvocationError { function, source })
            }
        }
    }
}

impl AssetRegistryService<EnvPeerIdentity, RandomTokenGenerator> {
    /// Service configured from the environment, executing on the peer named
    /// by `CORE_PEER_LOCALMSPID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            RegistryConfig::from_env(),
            EnvPeerIdentity::new(),
            RandomTokenGenerator,
        )
    }
}

/// Service for a peer of `peer_org`, with default configuration.
pub fn create_test_service(
    peer_org: &str,
) -> AssetRegistryService<StaticPeerIdentity, RandomTokenGenerator> {
    AssetRegistryService::with_defaults(StaticPeerIdentity::new(peer_org), RandomTokenGenerator)
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, RegistryError> {
    serde_json::to_vec(value).map_err(|e| StorageError::Serialization(e.to_string()).into())
}

// =============================================================================
// AssetRegistryApi Implementation
// =============================================================================

impl<P: PeerIdentity, G: TokenGenerator> AssetRegistryApi for AssetRegistryService<P, G> {
    #[instrument(skip_all, fields(function = functions::ISSUE_ASSET))]
    fn issue_asset<C: InvocationContext>(&self, ctx: &C) -> Result<Vec<u8>, InvocationError> {
        let started = Instant::now();
        let result = self.issue(ctx);
        if result.is_ok() {
            info!("IssueAsset succeeded");
        }
        self.finish(functions::ISSUE_ASSET, started, result)
    }

    #[instrument(skip_all, fields(function = functions::TRANSFER_ASSET))]
    fn transfer_asset<C: InvocationContext>(&self, ctx: &C) -> Result<(), InvocationError> {
        let started = Instant::now();
        let result = self.transfer(ctx);
        if result.is_ok() {
            info!("TransferAsset succeeded");
        }
        self.finish(functions::TRANSFER_ASSET, started, result)
    }

    #[instrument(skip(self, ctx), fields(function = functions::READ_ASSET))]
    fn read_asset<C: InvocationContext>(
        &self,
        ctx: &C,
        asset_key: &str,
    ) -> Result<Option<Vec<u8>>, InvocationError> {
        let started = Instant::now();
        let result = self
            .engine
            .read(ctx, &AssetKey::new(asset_key))
            .and_then(|asset| asset.as_ref().map(encode).transpose());
        self.finish(functions::READ_ASSET, started, result)
    }

    #[instrument(skip(self, ctx), fields(function = functions::LOCATE_ASSET))]
    fn locate_asset<C: InvocationContext>(
        &self,
        ctx: &C,
        asset_key: &str,
    ) -> Result<Option<AssetLocation>, InvocationError> {
        let started = Instant::now();
        let result = self.engine.locate(ctx, &AssetKey::new(asset_key));
        self.finish(functions::LOCATE_ASSET, started, result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
