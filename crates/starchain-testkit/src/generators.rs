//! Proptest generators for property-based testing.

use proptest::prelude::*;

use starchain_core::{
    challenge_message, ClaimRecord, Digest, Keypair, OwnershipSignature, Star,
    WalletAddress,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random wallet address (always backed by a real key).
pub fn wallet_address() -> impl Strategy<Value = WalletAddress> {
    keypair().prop_map(|kp| kp.address())
}

/// Generate a random digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Generate a random (not necessarily valid) signature.
pub fn ownership_signature() -> impl Strategy<Value = OwnershipSignature> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(a, b)| {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&a);
        bytes[32..].copy_from_slice(&b);
        OwnershipSignature::from_bytes(bytes)
    })
}

/// Generate a reasonable Unix-seconds timestamp (up to year 2100).
pub fn timestamp_secs() -> impl Strategy<Value = u64> {
    0u64..=4_102_444_800
}

/// Generate a star with plausible coordinate strings.
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[0-2][0-9]h [0-5][0-9]m [0-5][0-9]\\.[0-9]s",
        "-?[0-8][0-9]° [0-5][0-9]' [0-5][0-9]\\.[0-9]\"",
        ".{0,120}",
    )
        .prop_map(|(ra, dec, story)| Star::new(ra, dec, story))
}

/// Generate a fully consistent claim record: the message is a real
/// challenge for the address and the signature actually covers it.
pub fn claim_record() -> impl Strategy<Value = ClaimRecord> {
    (keypair(), timestamp_secs(), star()).prop_map(|(kp, issued_at, star)| {
        let address = kp.address();
        let message = challenge_message(&address, issued_at);
        let signature = kp.sign(&message);
        ClaimRecord {
            address,
            message,
            star,
            signature,
        }
    })
}
