//! Identity adapters.

use crate::errors::IdentityError;
use crate::ports::outbound::{ClientIdentity, PeerIdentity};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::env;

/// Environment variable carrying the local peer's MSP id.
pub const PEER_MSP_ID_ENV: &str = "CORE_PEER_LOCALMSPID";

/// Client identity with fixed attributes. `None` models a certificate that
/// lacks the attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticClientIdentity {
    msp_id: Option<String>,
    id: Option<String>,
}

impl StaticClientIdentity {
    /// Client of `msp_id` with a conventional x509 subject.
    pub fn new(msp_id: impl Into<String>) -> Self {
        let msp_id = msp_id.into();
        let subject = format!("x509::CN=client@{msp_id}::CN=ca.{msp_id}");
        Self {
            msp_id: Some(msp_id),
            id: Some(STANDARD.encode(subject)),
        }
    }

    /// Client without any resolvable attribute.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replace the client id with the base64 encoding of `subject`.
    #[must_use]
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.id = Some(STANDARD.encode(subject));
        self
    }

    /// Replace the client id with an already encoded value.
    #[must_use]
    pub fn with_raw_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl ClientIdentity for StaticClientIdentity {
    fn get_msp_id(&self) -> Result<String, IdentityError> {
        self.msp_id.clone().ok_or_else(|| {
            IdentityError::ClientOrgUnavailable("client certificate carries no MSP id".into())
        })
    }

    fn get_id(&self) -> Result<String, IdentityError> {
        self.id
            .clone()
            .ok_or_else(|| IdentityError::ClientId("client certificate carries no id".into()))
    }
}

/// Peer identity with a fixed MSP id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPeerIdentity(String);

impl StaticPeerIdentity {
    /// Peer belonging to `msp_id`.
    pub fn new(msp_id: impl Into<String>) -> Self {
        Self(msp_id.into())
    }
}

impl PeerIdentity for StaticPeerIdentity {
    fn local_msp_id(&self) -> Result<String, IdentityError> {
        if self.0.is_empty() {
            return Err(IdentityError::PeerOrgUnavailable("peer MSP id is empty".into()));
        }
        Ok(self.0.clone())
    }
}

/// Peer identity read from the environment on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPeerIdentity {
    var: String,
}

impl EnvPeerIdentity {
    /// Read [`PEER_MSP_ID_ENV`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_var(PEER_MSP_ID_ENV)
    }

    /// Read a custom variable.
    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvPeerIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerIdentity for EnvPeerIdentity {
    fn local_msp_id(&self) -> Result<String, IdentityError> {
        match env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(value),
            Ok(_) => Err(IdentityError::PeerOrgUnavailable(format!("{} is empty", self.var))),
            Err(e) => Err(IdentityError::PeerOrgUnavailable(format!("{}: {e}", self.var))),
        }
    }
}
