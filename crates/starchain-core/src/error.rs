//! Error types for the starchain core.

use serde::Serialize;
use thiserror::Error;

use crate::crypto::{Digest, WalletAddress};

/// Internal failures while sealing or linking a block.
#[derive(Debug, Error)]
pub enum AppendError {
    #[error("payload encoding failed: {0}")]
    PayloadEncoding(String),

    #[error("digest computation failed: {0}")]
    DigestComputation(String),
}

/// Rejections of a star-claim submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("challenge message is malformed: {0}")]
    MalformedChallenge(String),

    #[error("ownership challenge expired: issued at {issued_at}, {elapsed}s elapsed")]
    ExpiredChallenge { issued_at: u64, elapsed: u64 },

    #[error("ownership signature rejected for address {address}")]
    InvalidSignature { address: WalletAddress },

    #[error(transparent)]
    Append(#[from] AppendError),
}

/// Outcomes of a lookup that found nothing to return.
///
/// `ChainEmpty` is distinct from `NotFound`: the former means the query ran
/// against a chain with no blocks at all (unreachable once genesis exists,
/// but reported rather than conflated), the latter that a well-formed query
/// simply had no match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("chain is empty")]
    ChainEmpty,

    #[error("no matching entry found")]
    NotFound,
}

/// Failures decoding a stored block payload back into a claim record.
#[derive(Debug, Error)]
pub enum PayloadDecodeError {
    #[error("genesis block holds a sentinel payload, not claim data")]
    GenesisBlock,

    #[error("payload is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not a valid claim record: {0}")]
    Parse(String),
}

/// A single finding from full-chain validation.
///
/// Faults are descriptions, not auto-repairs: a chain that reports faults
/// stays queryable and keeps accepting appends.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ChainFault {
    #[error("tampered block at height {height}")]
    TamperedBlock { height: u64 },

    #[error("broken link at height {height}: expected {expected:?}, found {found:?}")]
    BrokenLink {
        height: u64,
        expected: Option<Digest>,
        found: Option<Digest>,
    },
}

impl ChainFault {
    /// The height the fault was recorded at.
    pub fn height(&self) -> u64 {
        match self {
            ChainFault::TamperedBlock { height } => *height,
            ChainFault::BrokenLink { height, .. } => *height,
        }
    }
}
