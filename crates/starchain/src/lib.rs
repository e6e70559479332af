//! # Starchain
//!
//! The unified API for the starchain star registry: an in-memory,
//! append-only, hash-linked ledger of star claims guarded by a time-bounded
//! ownership challenge protocol.
//!
//! ## Overview
//!
//! - **Block**: immutable once sealed; any later mutation is detectable.
//! - **Chain**: append-only, genesis-first; blocks enter only through
//!   verified claim submission.
//! - **Challenge**: a client proves wallet-address ownership by signing
//!   `ADDRESS:TIMESTAMP:starRegistry` within a 300-second window.
//! - **Validation**: advisory and exhaustive; faults are reported, never
//!   auto-repaired.
//!
//! ## Usage
//!
//! ```rust
//! use starchain::{Keypair, Star, StarRegistry};
//!
//! let registry = StarRegistry::new().unwrap();
//!
//! // A client proves ownership of its wallet address...
//! let wallet = Keypair::generate();
//! let message = registry.request_ownership_challenge(&wallet.address());
//! let signature = wallet.sign(&message);
//!
//! // ...and registers a star.
//! let star = Star::new("16h 29m 1.0s", "-26° 29' 24.9\"", "my first star");
//! let block = registry
//!     .submit_claim(wallet.address(), message, signature, star)
//!     .unwrap();
//!
//! assert_eq!(block.height, 1);
//! assert!(registry.validate_chain().is_empty());
//! ```

pub mod clock;
pub mod registry;

// Re-export the core crate for convenience
pub use starchain_core as core;

pub use clock::{Clock, SystemClock};
pub use registry::StarRegistry;

// Re-export commonly used core types
pub use starchain_core::{
    AppendError, Block, Chain, ChainFault, ClaimRecord, Digest, Ed25519Verifier, Keypair,
    OwnershipSignature, OwnershipVerifier, PayloadDecodeError, QueryError, Star, SubmitError,
    WalletAddress, CHALLENGE_WINDOW_SECS,
};
