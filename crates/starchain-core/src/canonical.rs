//! Canonical encoding of a block's digest preimage.
//!
//! A block's digest covers every field except the digest itself, so the
//! serialized form must be byte-identical for the same field values on every
//! platform. The preimage is a fixed domain-separation tag followed by a
//! CBOR map with integer keys, built in key order with definite lengths and
//! minimal integer encodings.
//!
//! Because the digest field never appears in the preimage, validation can
//! recompute it without temporarily clearing the stored digest.

use ciborium::value::Value;

use crate::crypto::Digest;
use crate::error::AppendError;

/// Domain-separation tag prefixed to every preimage.
const DOMAIN_TAG: &[u8] = b"starchain-block-v0";

/// Preimage field keys (integer keys for compact encoding).
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const CREATED_AT: u64 = 1;
    pub const PREVIOUS_DIGEST: u64 = 2;
    pub const PAYLOAD: u64 = 3;
}

/// Encode the sealed field set of a block to its canonical preimage bytes.
pub fn block_preimage(
    height: u64,
    created_at: u64,
    previous_digest: Option<&Digest>,
    payload: &str,
) -> Result<Vec<u8>, AppendError> {
    let prev_value = match previous_digest {
        Some(digest) => Value::Bytes(digest.as_bytes().to_vec()),
        None => Value::Null,
    };

    // Entries in key order (already sorted 0-3).
    let entries = vec![
        (
            Value::Integer(keys::HEIGHT.into()),
            Value::Integer(height.into()),
        ),
        (
            Value::Integer(keys::CREATED_AT.into()),
            Value::Integer(created_at.into()),
        ),
        (Value::Integer(keys::PREVIOUS_DIGEST.into()), prev_value),
        (
            Value::Integer(keys::PAYLOAD.into()),
            Value::Text(payload.to_owned()),
        ),
    ];

    let mut buf = Vec::with_capacity(DOMAIN_TAG.len() + 64 + payload.len());
    buf.extend_from_slice(DOMAIN_TAG);
    ciborium::ser::into_writer(&Value::Map(entries), &mut buf)
        .map_err(|e| AppendError::DigestComputation(e.to_string()))?;
    Ok(buf)
}
