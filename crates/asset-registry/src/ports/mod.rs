//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the asset registry.
//!
//! - **Driving Ports (Inbound)**: `AssetRegistryApi`
//! - **Driven Ports (Outbound)**: `LedgerStub` (private data, public state,
//!   transient input), `ClientIdentity`, `PeerIdentity`, `TokenGenerator`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
