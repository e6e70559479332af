//! Block: one immutable, hash-sealed entry in the chain.
//!
//! A block stores its payload in an encoded form (JSON, then hex) so the
//! canonical serialization is stable and opaque to casual inspection.
//! Linkage fields are placeholders until the owning chain seals the block at
//! append time; after sealing, any mutation is detectable via [`Block::validate`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::canonical;
use crate::claim::ClaimRecord;
use crate::crypto::Digest;
use crate::error::{AppendError, PayloadDecodeError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// SHA-256 over the canonical form of all other fields; `None` until
    /// sealed.
    pub digest: Option<Digest>,

    /// Position in the chain; 0 is genesis.
    pub height: u64,

    /// Hex-encoded JSON of the stored record.
    pub payload: String,

    /// Unix seconds, assigned at append time.
    pub created_at: u64,

    /// Digest of the preceding block; `None` only for genesis.
    pub previous_digest: Option<Digest>,
}

impl Block {
    /// Construct an unsealed block around `record`.
    ///
    /// Height, timestamp, and linkage are placeholders; the owning chain
    /// fills them in when it appends the block.
    pub fn new<T: Serialize>(record: &T) -> Result<Self, AppendError> {
        let json = serde_json::to_string(record)
            .map_err(|e| AppendError::PayloadEncoding(e.to_string()))?;
        Ok(Self {
            digest: None,
            height: 0,
            payload: hex::encode(json),
            created_at: 0,
            previous_digest: None,
        })
    }

    /// Seal the block: set the linkage fields, then compute the digest over
    /// them. Field-then-hash order matters: the digest must cover the final
    /// field values. Called exactly once, from the chain's append path.
    pub(crate) fn seal(
        &mut self,
        previous_digest: Option<Digest>,
        height: u64,
        created_at: u64,
    ) -> Result<(), AppendError> {
        self.height = height;
        self.created_at = created_at;
        self.previous_digest = previous_digest;
        self.digest = Some(self.compute_digest()?);
        Ok(())
    }

    /// Recompute the digest over the block's current field values.
    ///
    /// The stored digest is excluded from the preimage by construction, so
    /// this never needs to touch it.
    pub fn compute_digest(&self) -> Result<Digest, AppendError> {
        let preimage = canonical::block_preimage(
            self.height,
            self.created_at,
            self.previous_digest.as_ref(),
            &self.payload,
        )?;
        Ok(Digest::hash(&preimage))
    }

    /// Check the stored digest against a recomputation over current state.
    ///
    /// Returns false for an unsealed block, or when any sealed field has
    /// been mutated since sealing. Side-effect-free.
    pub fn validate(&self) -> bool {
        match (&self.digest, self.compute_digest()) {
            (Some(stored), Ok(current)) => *stored == current,
            _ => false,
        }
    }

    /// Whether this is the sentinel block at height 0.
    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }

    /// Decode the stored payload back into the claim record.
    ///
    /// The genesis payload is a sentinel and is refused rather than decoded.
    pub fn decode_payload(&self) -> Result<ClaimRecord, PayloadDecodeError> {
        if self.is_genesis() {
            return Err(PayloadDecodeError::GenesisBlock);
        }
        let raw = hex::decode(&self.payload)?;
        let text = String::from_utf8(raw)?;
        serde_json::from_str(&text).map_err(|e| PayloadDecodeError::Parse(e.to_string()))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("<unprintable block>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{ClaimRecord, Star};
    use crate::crypto::Keypair;
    use proptest::prelude::*;

    fn sample_record() -> ClaimRecord {
        let keypair = Keypair::from_seed(&[3; 32]);
        ClaimRecord {
            address: keypair.address(),
            message: format!("{}:1700000000:starRegistry", keypair.address()),
            star: Star::new("13h 03m 33.3s", "-49° 31' 38.1\"", "first claim"),
            signature: keypair.sign("msg"),
        }
    }

    fn sealed_block() -> Block {
        let mut block = Block::new(&sample_record()).unwrap();
        block.seal(Some(Digest::hash(b"prev")), 1, 1_700_000_000).unwrap();
        block
    }

    #[test]
    fn test_new_block_is_unsealed() {
        let block = Block::new(&sample_record()).unwrap();
        assert_eq!(block.digest, None);
        assert_eq!(block.height, 0);
        assert_eq!(block.created_at, 0);
        assert_eq!(block.previous_digest, None);
        assert!(!block.validate());
    }

    #[test]
    fn test_seal_then_validate() {
        let block = sealed_block();
        assert!(block.digest.is_some());
        assert!(block.validate());
    }

    #[test]
    fn test_validate_is_side_effect_free() {
        let block = sealed_block();
        let before = block.clone();
        let _ = block.validate();
        assert_eq!(block, before);
    }

    #[test]
    fn test_tampering_any_field_breaks_validation() {
        let mut block = sealed_block();
        block.height += 1;
        assert!(!block.validate());

        let mut block = sealed_block();
        block.created_at += 1;
        assert!(!block.validate());

        let mut block = sealed_block();
        block.previous_digest = Some(Digest::hash(b"forged"));
        assert!(!block.validate());

        let mut block = sealed_block();
        block.payload = hex::encode("{\"data\":\"forged\"}");
        assert!(!block.validate());

        let mut block = sealed_block();
        block.digest = Some(Digest::hash(b"forged"));
        assert!(!block.validate());
    }

    #[test]
    fn test_decode_payload_roundtrip() {
        let record = sample_record();
        let mut block = Block::new(&record).unwrap();
        block.seal(Some(Digest::hash(b"prev")), 4, 1_700_000_000).unwrap();
        assert_eq!(block.decode_payload().unwrap(), record);
    }

    #[test]
    fn test_decode_payload_refuses_genesis() {
        let mut block = Block::new(&crate::claim::GenesisMarker {
            data: crate::claim::GENESIS_DATA,
        })
        .unwrap();
        block.seal(None, 0, 1_700_000_000).unwrap();
        assert!(matches!(
            block.decode_payload(),
            Err(PayloadDecodeError::GenesisBlock)
        ));
    }

    #[test]
    fn test_decode_payload_rejects_corrupt_hex() {
        let mut block = sealed_block();
        block.payload = "zz not hex".into();
        assert!(matches!(
            block.decode_payload(),
            Err(PayloadDecodeError::Hex(_))
        ));
    }

    #[test]
    fn test_decode_payload_rejects_non_record_json() {
        let mut block = sealed_block();
        block.payload = hex::encode("[1, 2, 3]");
        assert!(matches!(
            block.decode_payload(),
            Err(PayloadDecodeError::Parse(_))
        ));
    }

    #[test]
    fn test_display_renders_json() {
        let block = sealed_block();
        let rendered = block.to_string();
        assert!(rendered.starts_with('{'));
        assert!(rendered.contains("\"height\":1"));
    }

    proptest! {
        #[test]
        fn prop_payload_roundtrips(ra in ".{0,40}", dec in ".{0,40}", story in ".{0,200}") {
            let keypair = Keypair::from_seed(&[11; 32]);
            let record = ClaimRecord {
                address: keypair.address(),
                message: "addr:0:starRegistry".into(),
                star: Star::new(ra, dec, story),
                signature: keypair.sign("msg"),
            };
            let mut block = Block::new(&record).unwrap();
            block.seal(None, 2, 42).unwrap();
            prop_assert_eq!(block.decode_payload().unwrap(), record);
        }

        #[test]
        fn prop_digest_covers_payload(tweak in "[0-9a-f]{8}") {
            let mut block = Block::new(&sample_record()).unwrap();
            block.seal(None, 1, 42).unwrap();
            let sealed_payload = block.payload.clone();
            block.payload = tweak;
            prop_assume!(block.payload != sealed_payload);
            prop_assert!(!block.validate());
        }
    }
}
