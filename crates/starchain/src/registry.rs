//! The star registry: thread-safe owner of the chain.
//!
//! `StarRegistry` is the surface the request-handling layer talks to. It
//! owns the [`Chain`] behind a `RwLock`, reads the clock once per operation,
//! and delegates to the core. Queries take the read lock and clone out fully
//! sealed blocks, so a reader can never observe a partially appended block;
//! claim submission holds the write lock across its whole
//! read-then-mutate sequence, which is the required exclusion for the
//! chain's single-writer model.

use std::sync::RwLock;

use starchain_core::{
    AppendError, Block, Chain, ChainFault, ClaimRecord, Digest, Ed25519Verifier,
    OwnershipSignature, OwnershipVerifier, QueryError, Star, SubmitError, WalletAddress,
};

use crate::clock::{Clock, SystemClock};

/// The registry facade, generic over its injected collaborators.
///
/// Production code uses the defaults ([`Ed25519Verifier`], [`SystemClock`]);
/// tests substitute fakes for deterministic time and verification outcomes.
pub struct StarRegistry<V = Ed25519Verifier, C = SystemClock> {
    chain: RwLock<Chain>,
    verifier: V,
    clock: C,
}

impl StarRegistry {
    /// Create a registry with the production collaborators. The genesis
    /// block exists before this returns.
    pub fn new() -> Result<Self, AppendError> {
        Self::with_collaborators(Ed25519Verifier, SystemClock)
    }
}

impl<V: OwnershipVerifier, C: Clock> StarRegistry<V, C> {
    /// Create a registry with explicit collaborators.
    pub fn with_collaborators(verifier: V, clock: C) -> Result<Self, AppendError> {
        let chain = Chain::new(clock.now_secs())?;
        tracing::info!("star registry initialized");
        Ok(Self {
            chain: RwLock::new(chain),
            verifier,
            clock,
        })
    }

    /// Current chain height.
    pub fn height(&self) -> u64 {
        self.chain.read().unwrap().height()
    }

    /// Block at `height`, or `None` past the head.
    pub fn block_by_height(&self, height: u64) -> Option<Block> {
        self.chain.read().unwrap().block_by_height(height).cloned()
    }

    /// Block with the given digest.
    pub fn block_by_digest(&self, digest: &Digest) -> Result<Block, QueryError> {
        self.chain.read().unwrap().block_by_digest(digest).cloned()
    }

    /// Issue an ownership challenge message for `address`, dated now.
    pub fn request_ownership_challenge(&self, address: &WalletAddress) -> String {
        self.chain
            .read()
            .unwrap()
            .request_ownership_challenge(address, self.clock.now_secs())
    }

    /// Verify a signed challenge and append the claim.
    pub fn submit_claim(
        &self,
        address: WalletAddress,
        message: String,
        signature: OwnershipSignature,
        star: Star,
    ) -> Result<Block, SubmitError> {
        let now = self.clock.now_secs();
        let mut chain = self.chain.write().unwrap();
        chain
            .submit_claim(address, message, signature, star, &self.verifier, now)
            .map(Block::clone)
    }

    /// Decoded claims owned by `address`, in chain order.
    pub fn claims_by_owner(&self, address: &WalletAddress) -> Result<Vec<ClaimRecord>, QueryError> {
        self.chain.read().unwrap().claims_by_owner(address)
    }

    /// Run full-chain validation; empty means healthy.
    pub fn validate_chain(&self) -> Vec<ChainFault> {
        let faults = self.chain.read().unwrap().validate();
        if !faults.is_empty() {
            tracing::warn!(faults = faults.len(), "chain validation reported faults");
        }
        faults
    }
}
