//! Token generators.

use crate::ports::outbound::TokenGenerator;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// UUIDv4 tokens and wall-clock nanosecond freshness.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn new_unique_token(&self) -> Uuid {
        Uuid::new_v4()
    }

    fn freshness(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }
}

/// Always returns the same token and freshness. Every asset of a type gets
/// the same key.
#[derive(Debug, Clone, Copy)]
pub struct FixedTokenGenerator {
    token: Uuid,
    freshness: u64,
}

impl FixedTokenGenerator {
    /// Generator yielding `token` and `freshness` forever.
    #[must_use]
    pub const fn new(token: Uuid, freshness: u64) -> Self {
        Self { token, freshness }
    }
}

impl TokenGenerator for FixedTokenGenerator {
    fn new_unique_token(&self) -> Uuid {
        self.token
    }

    fn freshness(&self) -> u64 {
        self.freshness
    }
}
