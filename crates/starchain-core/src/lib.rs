//! # Starchain Core
//!
//! Primitives for a single-process, append-only, hash-linked ledger of star
//! claims: blocks, the chain, and the time-bounded ownership challenge
//! protocol.
//!
//! This crate contains no I/O. Clock values are passed in by callers and
//! signature verification is an injected collaborator, so every operation is
//! a deterministic, synchronous function of its inputs.
//!
//! ## Key Types
//!
//! - [`Block`] - One immutable, hash-sealed entry in the chain
//! - [`Chain`] - The ordered, append-only block sequence and its operations
//! - [`Digest`] - SHA-256 identity and tamper seal of a block
//! - [`ClaimRecord`] - The verified record stored in a non-genesis block
//! - [`OwnershipVerifier`] - The injected signature-verification seam
//!
//! ## Canonicalization
//!
//! Block digests cover a deterministic CBOR preimage of every field except
//! the digest itself. See the [`canonical`] module.

pub mod block;
pub mod canonical;
pub mod chain;
pub mod challenge;
pub mod claim;
pub mod crypto;
pub mod error;

pub use block::Block;
pub use chain::Chain;
pub use challenge::{challenge_message, CHALLENGE_WINDOW_SECS};
pub use claim::{ClaimRecord, Star, GENESIS_DATA};
pub use crypto::{
    Digest, Ed25519Verifier, Keypair, OwnershipSignature, OwnershipVerifier, WalletAddress,
};
pub use error::{AppendError, ChainFault, PayloadDecodeError, QueryError, SubmitError};
