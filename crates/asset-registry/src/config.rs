//! # Registry Configuration
//!
//! Partition naming and confidential-input limits. Everything has a default
//! matching the implicit private collection convention, and can be overridden
//! from the environment.

use std::env;
use thiserror::Error;

/// Prefix of an organization's implicit private partition.
pub const DEFAULT_PARTITION_PREFIX: &str = "_implicit_org_";

/// Upper bound for a single confidential input field.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024;

/// Confidential field carrying the asset to issue.
pub const ASSET_PROPERTIES_FIELD: &str = "asset_properties";

/// Confidential field carrying the asset snapshot to transfer.
pub const ASSET_TRANSFER_FIELD: &str = "asset_transfer";

/// Confidential field carrying the buyer organization.
pub const BUYER_ORG_FIELD: &str = "buyer_org";

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Prefix prepended to an org id to name its private partition.
    pub partition_prefix: String,
    /// Maximum accepted size of one confidential input field, in bytes.
    pub max_confidential_input_bytes: usize,
    /// Confidential field names read by the request adapter.
    pub fields: ConfidentialFields,
}

/// Names of the confidential (transient) input fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidentialFields {
    /// Field read by `IssueAsset`.
    pub asset_properties: String,
    /// Field read by `TransferAsset`.
    pub asset_transfer: String,
    /// Buyer org field read by `TransferAsset`.
    pub buyer_org: String,
}

impl Default for ConfidentialFields {
    fn default() -> Self {
        Self {
            asset_properties: ASSET_PROPERTIES_FIELD.to_string(),
            asset_transfer: ASSET_TRANSFER_FIELD.to_string(),
            buyer_org: BUYER_ORG_FIELD.to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            partition_prefix: DEFAULT_PARTITION_PREFIX.to_string(),
            max_confidential_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            fields: ConfidentialFields::default(),
        }
    }
}

impl RegistryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AR_PARTITION_PREFIX`: Partition prefix (default: `_implicit_org_`)
    /// - `AR_MAX_INPUT_BYTES`: Confidential input limit (default: 65536)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            partition_prefix: env::var("AR_PARTITION_PREFIX")
                .unwrap_or(defaults.partition_prefix),
            max_confidential_input_bytes: env::var("AR_MAX_INPUT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_confidential_input_bytes),
            fields: defaults.fields,
        }
    }

    /// Reject configurations that would break partition naming or input handling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.partition_prefix.is_empty() {
            return Err(ConfigError::EmptyPartitionPrefix);
        }
        if self.max_confidential_input_bytes == 0 {
            return Err(ConfigError::ZeroInputLimit);
        }
        let fields = [
            &self.fields.asset_properties,
            &self.fields.asset_transfer,
            &self.fields.buyer_org,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(ConfigError::EmptyFieldName);
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Partition names would collide with bare org ids.
    #[error("partition prefix must not be empty")]
    EmptyPartitionPrefix,

    /// No confidential input could ever be accepted.
    #[error("max confidential input size must be greater than zero")]
    ZeroInputLimit,

    /// A confidential field name is empty.
    #[error("confidential field names must not be empty")]
    EmptyFieldName,
}
