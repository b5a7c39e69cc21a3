//! # Authorization Policy Manager
//!
//! Installs key-level write-endorsement policies. The installed policy
//! replaces whatever was there before; installing the same org set twice
//! leaves the same bytes in place.

use crate::domain::policy::{EndorsementPolicy, PrincipalRole};
use crate::domain::value_objects::{AssetKey, PartitionName};
use crate::errors::PolicyError;
use crate::ports::outbound::{PrivateDataStore, PublicStateStore};
use tracing::debug;

/// Require exactly `orgs` (as peers) to endorse future writes to `key` in
/// `partition`.
pub fn set_write_endorsers<S, I, O>(
    store: &S,
    partition: &PartitionName,
    key: &AssetKey,
    orgs: I,
) -> Result<EndorsementPolicy, PolicyError>
where
    S: PrivateDataStore + ?Sized,
    I: IntoIterator<Item = O>,
    O: AsRef<str>,
{
    let policy = build_policy(orgs)?;
    store.set_private_data_validation_parameter(partition, key, &policy.to_bytes()?)?;
    debug!(
        collection = %partition,
        asset_key = %key,
        endorsing_orgs = ?policy.list_orgs(),
        "Write endorsement policy set"
    );
    Ok(policy)
}

/// Policy currently installed on `key` in `partition`, if any.
pub fn write_endorsers<S>(
    store: &S,
    partition: &PartitionName,
    key: &AssetKey,
) -> Result<Option<EndorsementPolicy>, PolicyError>
where
    S: PrivateDataStore + ?Sized,
{
    store
        .get_private_data_validation_parameter(partition, key)?
        .map(|bytes| EndorsementPolicy::from_bytes(&bytes))
        .transpose()
}

/// Require exactly `orgs` to endorse future writes to the public `state_key`.
pub fn set_state_endorsers<S, I, O>(
    store: &S,
    state_key: &str,
    orgs: I,
) -> Result<EndorsementPolicy, PolicyError>
where
    S: PublicStateStore + ?Sized,
    I: IntoIterator<Item = O>,
    O: AsRef<str>,
{
    let policy = build_policy(orgs)?;
    store.set_state_validation_parameter(state_key, &policy.to_bytes()?)?;
    debug!(state_key, endorsing_orgs = ?policy.list_orgs(), "State endorsement policy set");
    Ok(policy)
}

fn build_policy<I, O>(orgs: I) -> Result<EndorsementPolicy, PolicyError>
where
    I: IntoIterator<Item = O>,
    O: AsRef<str>,
{
    let mut policy = EndorsementPolicy::new();
    policy.add_orgs(PrincipalRole::Peer, orgs)?;
    if policy.list_orgs().is_empty() {
        return Err(PolicyError::EmptyOrgSet);
    }
    Ok(policy)
}
