//! Cryptographic primitives for starchain.
//!
//! Wraps SHA-256 digests and Ed25519 ownership signatures with strong types.
//! The chain itself never touches raw key material; it sees wallet addresses
//! (hex-encoded verifying keys) and opaque signatures, and delegates
//! verification to an [`OwnershipVerifier`].

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// A 32-byte SHA-256 digest, used as a block's identity and tamper seal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; 32]);

impl Digest {
    /// Compute the SHA-256 digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero digest (sentinel value).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// Digests travel as hex strings in serialized blocks.
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A wallet address: the hex encoding of an Ed25519 verifying key.
///
/// The protocol treats addresses as ordinary strings (they are embedded
/// verbatim in challenge messages); the string is parsed into key material
/// only at verification time, by [`Ed25519Verifier`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.get(..16).unwrap_or(&self.0);
        write!(f, "WalletAddress({})", prefix)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A 64-byte Ed25519 signature over a challenge message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct OwnershipSignature(pub [u8; 64]);

impl OwnershipSignature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string (the form clients submit).
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero signature (invalid, used as placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for OwnershipSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnershipSig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for OwnershipSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for OwnershipSignature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl Serialize for OwnershipSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for OwnershipSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A keypair for signing challenge messages.
///
/// Clients hold these; the chain only ever sees the derived address.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The wallet address derived from this keypair.
    pub fn address(&self) -> WalletAddress {
        WalletAddress(hex::encode(self.signing_key.verifying_key().to_bytes()))
    }

    /// Sign a challenge message.
    pub fn sign(&self, message: &str) -> OwnershipSignature {
        let sig = self.signing_key.sign(message.as_bytes());
        OwnershipSignature(sig.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.address())
    }
}

/// The injected signature-verification collaborator.
///
/// The contract is pass/fail only: implementations must treat every failure
/// mode of the underlying primitive (bad key encoding, malformed signature,
/// verification error) as rejection.
pub trait OwnershipVerifier {
    /// Check that `signature` was produced over `message` by the key behind
    /// `address`.
    fn verify(
        &self,
        message: &str,
        address: &WalletAddress,
        signature: &OwnershipSignature,
    ) -> bool;
}

/// Production verifier: the address is a hex-encoded Ed25519 verifying key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl OwnershipVerifier for Ed25519Verifier {
    fn verify(
        &self,
        message: &str,
        address: &WalletAddress,
        signature: &OwnershipSignature,
    ) -> bool {
        let Ok(bytes) = hex::decode(address.as_str()) else {
            return false;
        };
        let Ok(arr) = <[u8; 32]>::try_from(bytes.as_slice()) else {
            return false;
        };
        let Ok(key) = VerifyingKey::from_bytes(&arr) else {
            return false;
        };
        let sig = Signature::from_bytes(signature.as_bytes());
        key.verify(message.as_bytes(), &sig).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_sign_verify() {
        let keypair = Keypair::generate();
        let message = "hello world";
        let signature = keypair.sign(message);

        let verifier = Ed25519Verifier;
        assert!(verifier.verify(message, &keypair.address(), &signature));

        // Tampered message must fail.
        assert!(!verifier.verify("hello worlD", &keypair.address(), &signature));
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.address(), kp2.address());
    }

    #[test]
    fn test_verifier_rejects_foreign_address() {
        let signer = Keypair::from_seed(&[1; 32]);
        let other = Keypair::from_seed(&[2; 32]);
        let message = "claim";
        let signature = signer.sign(message);

        let verifier = Ed25519Verifier;
        assert!(verifier.verify(message, &signer.address(), &signature));
        assert!(!verifier.verify(message, &other.address(), &signature));
    }

    #[test]
    fn test_verifier_rejects_garbage_address() {
        let keypair = Keypair::generate();
        let signature = keypair.sign("msg");
        let verifier = Ed25519Verifier;

        assert!(!verifier.verify("msg", &WalletAddress::new("not hex at all"), &signature));
        assert!(!verifier.verify("msg", &WalletAddress::new("abcd"), &signature));
    }

    #[test]
    fn test_digest_hash_deterministic() {
        let h1 = Digest::hash(b"test data");
        let h2 = Digest::hash(b"test data");
        assert_eq!(h1, h2);
        assert_ne!(h1, Digest::hash(b"different data"));
    }

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest = Digest::hash(b"roundtrip");
        let recovered = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, recovered);
    }

    #[test]
    fn test_digest_from_hex_rejects_wrong_length() {
        assert!(Digest::from_hex("abcd").is_err());
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let signature = Keypair::generate().sign("message");
        let recovered = OwnershipSignature::from_hex(&signature.to_hex()).unwrap();
        assert_eq!(signature, recovered);
    }
}
