//! # Identity Resolver
//!
//! Derives the calling organization from the invocation and checks that it
//! is the organization of the peer executing the logic. A client can only
//! read or write private data through a peer of its own organization.

use crate::domain::services::partition_for;
use crate::domain::value_objects::{OrgId, PartitionName};
use crate::errors::{AuthorizationError, IdentityError, RegistryError};
use crate::ports::outbound::{ClientIdentity, InvocationContext, PeerIdentity};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

/// Resolves caller and executor organizations.
#[derive(Debug, Clone)]
pub struct IdentityResolver<P: PeerIdentity> {
    peer: P,
}

impl<P: PeerIdentity> IdentityResolver<P> {
    /// Resolver for invocations executed on `peer`.
    pub fn new(peer: P) -> Self {
        Self { peer }
    }

    /// Organization of the submitting client.
    pub fn resolve_caller_org<C: InvocationContext>(&self, ctx: &C) -> Result<OrgId, IdentityError> {
        let msp_id = ctx.client_identity().get_msp_id()?;
        OrgId::parse(msp_id.as_str()).map_err(|_| IdentityError::MalformedOrg { value: msp_id })
    }

    /// Organization of the peer executing the invocation.
    pub fn resolve_executor_org(&self) -> Result<OrgId, IdentityError> {
        let msp_id = self.peer.local_msp_id()?;
        OrgId::parse(msp_id.as_str()).map_err(|_| IdentityError::MalformedOrg { value: msp_id })
    }

    /// Fail unless `caller` is the executing peer's organization.
    pub fn verify_caller_matches_executor(&self, caller: &OrgId) -> Result<(), RegistryError> {
        let peer_org = self.resolve_executor_org()?;
        if caller != &peer_org {
            warn!(client_org = %caller, peer_org = %peer_org, "Client org does not match peer org");
            return Err(AuthorizationError::ForeignPeer {
                client_org: caller.to_string(),
                peer_org: peer_org.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolve the caller, verify it against the executor, and name the
    /// caller's partition.
    pub fn caller_partition<C: InvocationContext>(
        &self,
        ctx: &C,
        prefix: &str,
    ) -> Result<(OrgId, PartitionName), RegistryError> {
        let caller = self.resolve_caller_org(ctx)?;
        self.verify_caller_matches_executor(&caller)?;
        let partition = partition_for(prefix, &caller);
        Ok((caller, partition))
    }

    /// Decoded client id of the submitter, for audit logging.
    pub fn submitting_client_identity<C: InvocationContext>(
        &self,
        ctx: &C,
    ) -> Result<String, IdentityError> {
        let b64_id = ctx.client_identity().get_id()?;
        let decoded = STANDARD
            .decode(b64_id.as_bytes())
            .map_err(|e| IdentityError::ClientId(format!("failed to base64 decode clientID: {e}")))?;
        String::from_utf8(decoded)
            .map_err(|e| IdentityError::ClientId(format!("clientID is not UTF-8: {e}")))
    }
}
