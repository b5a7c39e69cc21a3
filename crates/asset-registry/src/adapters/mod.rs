//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.
//!
//! - `InMemoryLedger`: private partitions and public state with
//!   per-invocation transactions, MVCC checks and endorsement enforcement
//! - `StaticClientIdentity`, `StaticPeerIdentity`, `EnvPeerIdentity`
//! - `RandomTokenGenerator`, `FixedTokenGenerator`

pub mod identity;
pub mod memory_ledger;
pub mod tokens;

pub use identity::{EnvPeerIdentity, StaticClientIdentity, StaticPeerIdentity, PEER_MSP_ID_ENV};
pub use memory_ledger::{InMemoryLedger, Invocation, LedgerKey, LedgerTransaction};
pub use tokens::{FixedTokenGenerator, RandomTokenGenerator};
