//! # Domain Layer (Inner Hexagon)
//!
//! Pure business logic for the asset registry.
//! NO I/O, NO clocks, NO randomness.
//!
//! - Value objects: org ids, asset ids/keys, partition names
//! - Entities: the asset record, the issue input, the public ownership marker
//! - Endorsement policy value
//! - Domain services: partition naming, asset identity composition
//! - Invariants: input and snapshot validation

pub mod entities;
pub mod invariants;
pub mod policy;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use policy::*;
pub use services::*;
pub use value_objects::*;
