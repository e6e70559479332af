//! Chain: the ordered, append-only sequence of blocks.
//!
//! The chain owns block creation end to end: it seals every block through
//! the single append path, runs the ownership challenge protocol for claim
//! submissions, and answers queries over the full sequence. It is a plain
//! in-memory structure with a single sequential writer: `&mut self` is the
//! exclusion mechanism for direct users, and the facade crate serializes
//! concurrent callers behind a lock.

use crate::block::Block;
use crate::challenge;
use crate::claim::{ClaimRecord, GenesisMarker, Star, GENESIS_DATA};
use crate::crypto::{Digest, OwnershipSignature, OwnershipVerifier, WalletAddress};
use crate::error::{AppendError, ChainFault, QueryError, SubmitError};

/// The append-only ledger of star claims.
///
/// `blocks` is public in the same spirit as the block fields: integrity is
/// enforced by tamper detection, not by visibility. Anything that bypasses
/// [`Chain::submit_claim`] shows up in [`Chain::validate`].
pub struct Chain {
    /// The block sequence; index equals height.
    pub blocks: Vec<Block>,

    /// Cached height, kept equal to `blocks.len() - 1` by the append path.
    height: u64,
}

impl Chain {
    /// Create a chain and ensure the genesis block exists before returning.
    ///
    /// `now_secs` becomes the genesis timestamp. A constructed chain is
    /// always ready: height 0, one sentinel block, no previous link.
    pub fn new(now_secs: u64) -> Result<Self, AppendError> {
        let mut chain = Self {
            blocks: Vec::new(),
            height: 0,
        };
        chain.ensure_genesis(now_secs)?;
        Ok(chain)
    }

    /// Create the genesis block iff the chain is empty. Idempotent; goes
    /// through the normal append path like every other block.
    pub fn ensure_genesis(&mut self, now_secs: u64) -> Result<(), AppendError> {
        if !self.blocks.is_empty() {
            return Ok(());
        }
        let genesis = Block::new(&GenesisMarker { data: GENESIS_DATA })?;
        self.append(genesis, now_secs)?;
        tracing::info!("genesis block created");
        Ok(())
    }

    /// Current chain height. Always ≥ 0 once constructed.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Number of blocks, genesis included.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Seal `block` onto the head of the chain.
    ///
    /// Order-sensitive: the block's height, link, and timestamp are fixed
    /// first, the digest is computed over them, and only then is the block
    /// published into the sequence. Afterwards a full-chain validation runs
    /// as an advisory post-condition. A failure is logged and left for
    /// [`Chain::validate`] callers to observe, but the block stays appended.
    pub(crate) fn append(&mut self, mut block: Block, now_secs: u64) -> Result<&Block, AppendError> {
        let n = self.blocks.len();
        let previous_digest = self.blocks.last().and_then(|b| b.digest);

        block.seal(previous_digest, n as u64, now_secs)?;

        self.blocks.push(block);
        self.height = n as u64;

        let faults = self.validate();
        if !faults.is_empty() {
            tracing::warn!(
                height = n as u64,
                faults = faults.len(),
                "chain validation reported faults after append"
            );
        }

        tracing::debug!(height = n as u64, "block appended");
        Ok(&self.blocks[n])
    }

    /// Issue the challenge message a wallet owner must sign to prove
    /// ownership before submitting a claim.
    pub fn request_ownership_challenge(
        &self,
        address: &WalletAddress,
        now_secs: u64,
    ) -> String {
        tracing::debug!(address = %address, "ownership challenge requested");
        challenge::challenge_message(address, now_secs)
    }

    /// Verify a signed challenge and append the star claim.
    ///
    /// The message must still be inside the validity window (its issuance
    /// time is embedded in the message itself) and the signature must check
    /// out against the claiming address. On success the stored record is
    /// `{address, message, star, signature}`.
    pub fn submit_claim<V: OwnershipVerifier>(
        &mut self,
        address: WalletAddress,
        message: String,
        signature: OwnershipSignature,
        star: Star,
        verifier: &V,
        now_secs: u64,
    ) -> Result<&Block, SubmitError> {
        challenge::check_window(&message, now_secs)?;

        if !verifier.verify(&message, &address, &signature) {
            tracing::info!(address = %address, "claim rejected: signature verification failed");
            return Err(SubmitError::InvalidSignature { address });
        }

        tracing::info!(address = %address, "ownership verified, appending claim");

        let record = ClaimRecord {
            address,
            message,
            star,
            signature,
        };
        let block = Block::new(&record)?;
        Ok(self.append(block, now_secs)?)
    }

    /// Look up a block by exact digest match (linear scan, first match).
    ///
    /// An empty chain is reported as such, distinct from a digest that
    /// simply is not present.
    pub fn block_by_digest(&self, digest: &Digest) -> Result<&Block, QueryError> {
        if self.blocks.is_empty() {
            return Err(QueryError::ChainEmpty);
        }
        self.blocks
            .iter()
            .find(|b| b.digest.as_ref() == Some(digest))
            .ok_or(QueryError::NotFound)
    }

    /// Look up a block by height. Out of range is `None`, not an error.
    pub fn block_by_height(&self, height: u64) -> Option<&Block> {
        usize::try_from(height).ok().and_then(|i| self.blocks.get(i))
    }

    /// Collect the decoded claims owned by `address`, in chain order,
    /// genesis excluded.
    ///
    /// Blocks whose payload no longer decodes (post-append tampering) are
    /// skipped; the chain stays queryable and the damage is reported
    /// through [`Chain::validate`] instead. An empty result is `NotFound`.
    pub fn claims_by_owner(&self, address: &WalletAddress) -> Result<Vec<ClaimRecord>, QueryError> {
        if self.blocks.is_empty() {
            return Err(QueryError::ChainEmpty);
        }

        let mut claims = Vec::new();
        for block in self.blocks.iter().skip(1) {
            match block.decode_payload() {
                Ok(record) if record.address == *address => claims.push(record),
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(height = block.height, error = %err, "skipping undecodable payload");
                }
            }
        }

        if claims.is_empty() {
            return Err(QueryError::NotFound);
        }
        Ok(claims)
    }

    /// Validate the full chain, collecting every inconsistency.
    ///
    /// For each block: recheck its own digest, and (past genesis) confirm
    /// its link matches the digest actually stored on its predecessor. The
    /// two checks are independent, nothing halts early, and nothing is
    /// repaired. An empty result means the chain is consistent.
    pub fn validate(&self) -> Vec<ChainFault> {
        let mut faults = Vec::new();

        for (idx, block) in self.blocks.iter().enumerate() {
            let height = idx as u64;

            if !block.validate() {
                faults.push(ChainFault::TamperedBlock { height });
            }

            if idx > 0 {
                let expected = self.blocks[idx - 1].digest;
                if block.previous_digest != expected {
                    faults.push(ChainFault::BrokenLink {
                        height,
                        expected,
                        found: block.previous_digest,
                    });
                }
            }
        }

        faults
    }
}
