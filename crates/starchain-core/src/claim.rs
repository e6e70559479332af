//! Star claims: the records stored inside non-genesis blocks.

use serde::{Deserialize, Serialize};

use crate::crypto::{OwnershipSignature, WalletAddress};

/// The sentinel text carried by the genesis block's payload.
pub const GENESIS_DATA: &str = "Genesis Block";

/// A star registration: celestial coordinates plus the owner's story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Right ascension, e.g. `"16h 29m 1.0s"`.
    pub ra: String,
    /// Declination, e.g. `"-26° 29' 24.9\""`.
    pub dec: String,
    /// Free-form story text.
    pub story: String,
}

impl Star {
    pub fn new(ra: impl Into<String>, dec: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            dec: dec.into(),
            story: story.into(),
        }
    }
}

/// The full record wrapped into a block once ownership is verified:
/// the claiming address, the challenge message it signed, the star itself,
/// and the signature that proved ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub address: WalletAddress,
    pub message: String,
    pub star: Star,
    pub signature: OwnershipSignature,
}

/// The genesis payload. A marker record, distinguishable from any
/// [`ClaimRecord`]; it is encoded like user data but never decoded as such.
#[derive(Debug, Serialize)]
pub(crate) struct GenesisMarker {
    pub data: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    #[test]
    fn test_claim_record_json_roundtrip() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let record = ClaimRecord {
            address: keypair.address(),
            message: format!("{}:1700000000:starRegistry", keypair.address()),
            star: Star::new("16h 29m 1.0s", "-26° 29' 24.9\"", "Antares"),
            signature: keypair.sign("msg"),
        };

        let json = serde_json::to_string(&record).unwrap();
        let decoded: ClaimRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, decoded);
    }

    #[test]
    fn test_signature_serializes_as_hex() {
        let keypair = Keypair::from_seed(&[9; 32]);
        let signature = keypair.sign("msg");

        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(json, format!("\"{}\"", signature.to_hex()));
    }

    #[test]
    fn test_genesis_marker_is_not_a_claim_record() {
        let json = serde_json::to_string(&GenesisMarker { data: GENESIS_DATA }).unwrap();
        assert!(serde_json::from_str::<ClaimRecord>(&json).is_err());
    }
}
