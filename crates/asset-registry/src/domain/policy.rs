//! # Endorsement Policy
//!
//! Key-level write-endorsement requirement: every listed organization must
//! endorse a write to the record the policy is attached to.
//!
//! Principals are kept sorted, so the encoded bytes depend only on the set of
//! (org, role) pairs. Installing the same set twice yields identical bytes.

use crate::domain::value_objects::OrgId;
use crate::errors::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Role an organization's member must hold to count as an endorser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrincipalRole {
    /// Any member.
    Member,
    /// Peer nodes only.
    Peer,
    /// Client identities only.
    Client,
    /// Org administrators only.
    Admin,
}

/// One required endorser.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolicyPrincipal {
    /// Organization.
    #[serde(rename = "mspId")]
    pub msp_id: OrgId,
    /// Required role.
    pub role: PrincipalRole,
}

/// Write-endorsement policy attached to a single record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementPolicy {
    principals: BTreeSet<PolicyPrincipal>,
}

impl EndorsementPolicy {
    /// Policy with no principals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode policy bytes previously produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PolicyError> {
        let policy: Self =
            serde_json::from_slice(bytes).map_err(|e| PolicyError::Encoding(e.to_string()))?;
        if policy.principals.is_empty() {
            return Err(PolicyError::EmptyOrgSet);
        }
        Ok(policy)
    }

    /// Require endorsement from each of `orgs` in the given role.
    pub fn add_orgs<I, S>(&mut self, role: PrincipalRole, orgs: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for org in orgs {
            let org = org.as_ref();
            let msp_id =
                OrgId::parse(org).map_err(|_| PolicyError::MalformedOrg(org.to_string()))?;
            self.principals.insert(PolicyPrincipal { msp_id, role });
        }
        Ok(())
    }

    /// Drop every principal belonging to `orgs`.
    pub fn del_orgs<I, S>(&mut self, orgs: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doomed: BTreeSet<String> = orgs.into_iter().map(|o| o.as_ref().to_string()).collect();
        self.principals
            .retain(|p| !doomed.contains(p.msp_id.as_str()));
    }

    /// Organizations named by the policy, sorted and deduplicated.
    #[must_use]
    pub fn list_orgs(&self) -> Vec<OrgId> {
        let orgs: BTreeSet<&OrgId> = self.principals.iter().map(|p| &p.msp_id).collect();
        orgs.into_iter().cloned().collect()
    }

    /// Whether endorsements from `endorsers` satisfy the policy.
    ///
    /// Every named organization must be among the endorsers.
    #[must_use]
    pub fn is_satisfied_by(&self, endorsers: &BTreeSet<OrgId>) -> bool {
        !self.principals.is_empty()
            && self
                .principals
                .iter()
                .all(|p| endorsers.contains(&p.msp_id))
    }

    /// Canonical encoding installed as a validation parameter.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PolicyError> {
        if self.principals.is_empty() {
            return Err(PolicyError::EmptyOrgSet);
        }
        serde_json::to_vec(self).map_err(|e| PolicyError::Encoding(e.to_string()))
    }
}
