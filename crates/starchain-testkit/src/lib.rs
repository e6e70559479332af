//! # Starchain Testkit
//!
//! Testing utilities for starchain.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a manual clock, fake verifiers, and a bundled
//!   wallet-plus-registry setup for end-to-end scenarios
//! - **Generators**: proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! Quickly run the full claim flow:
//!
//! ```rust
//! use starchain_testkit::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let block = fixture.submit("my first star");
//! assert_eq!(block.height, 1);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starchain_testkit::generators::claim_record;
//!
//! proptest! {
//!     #[test]
//!     fn claims_roundtrip(record in claim_record()) {
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    multi_wallets, sample_star, ApproveAll, ManualClock, RejectAll, TestFixture,
    FIXTURE_EPOCH_SECS,
};
