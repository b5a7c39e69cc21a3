//! # Asset Registry Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared invocation helpers
//! ├── exploits/         # Attack simulations
//! │   ├── spoofing.rs   # Identity and peer spoofing
//! │   └── forged_snapshot.rs
//! └── integration/      # Multi-org flows against the in-memory ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p registry-tests
//!
//! # By category
//! cargo test -p registry-tests integration::
//! cargo test -p registry-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p registry-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
