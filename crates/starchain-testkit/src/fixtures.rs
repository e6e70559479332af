//! Test fixtures and fake collaborators.
//!
//! Common setup code for tests against the registry: a manual clock, fixed
//! verifiers, and a fixture bundling a wallet with a ready registry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use starchain::{Clock, StarRegistry};
use starchain_core::{
    Block, Ed25519Verifier, Keypair, OwnershipSignature, OwnershipVerifier, Star, WalletAddress,
};

/// A deterministic starting time for fixtures (2023-11-14T22:13:20Z).
pub const FIXTURE_EPOCH_SECS: u64 = 1_700_000_000;

/// Test clock that only moves when told to. Cloning shares the underlying
/// time, so a fixture can advance the clock a registry is already holding.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<AtomicU64>);

impl ManualClock {
    pub fn new(start_secs: u64) -> Self {
        Self(Arc::new(AtomicU64::new(start_secs)))
    }

    /// Move the clock forward.
    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }

    /// Pin the clock to an absolute time.
    pub fn set(&self, secs: u64) {
        self.0.store(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Verifier fake that approves every signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproveAll;

impl OwnershipVerifier for ApproveAll {
    fn verify(&self, _: &str, _: &WalletAddress, _: &OwnershipSignature) -> bool {
        true
    }
}

/// Verifier fake that rejects every signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl OwnershipVerifier for RejectAll {
    fn verify(&self, _: &str, _: &WalletAddress, _: &OwnershipSignature) -> bool {
        false
    }
}

/// A star with plausible coordinates for test claims.
pub fn sample_star(story: impl Into<String>) -> Star {
    Star::new("16h 29m 1.0s", "-26° 29' 24.9\"", story)
}

/// A test fixture with a wallet, a shared manual clock, and a registry
/// using real Ed25519 verification.
pub struct TestFixture {
    pub wallet: Keypair,
    pub clock: ManualClock,
    pub registry: StarRegistry<Ed25519Verifier, ManualClock>,
}

impl TestFixture {
    /// Create a fixture with a random wallet.
    pub fn new() -> Self {
        Self::with_wallet(Keypair::generate())
    }

    /// Create a fixture with a deterministic wallet from a seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::with_wallet(Keypair::from_seed(&seed))
    }

    fn with_wallet(wallet: Keypair) -> Self {
        let clock = ManualClock::new(FIXTURE_EPOCH_SECS);
        let registry = StarRegistry::with_collaborators(Ed25519Verifier, clock.clone())
            .expect("registry construction");
        Self {
            wallet,
            clock,
            registry,
        }
    }

    /// The fixture wallet's address.
    pub fn address(&self) -> WalletAddress {
        self.wallet.address()
    }

    /// Run the full claim flow for the fixture wallet.
    pub fn submit(&self, story: &str) -> Block {
        self.submit_for(&self.wallet, story)
    }

    /// Run the full claim flow for an arbitrary wallet: request a
    /// challenge, sign it, submit the claim.
    pub fn submit_for(&self, wallet: &Keypair, story: &str) -> Block {
        let message = self.registry.request_ownership_challenge(&wallet.address());
        let signature = wallet.sign(&message);
        self.registry
            .submit_claim(wallet.address(), message, signature, sample_star(story))
            .expect("claim submission")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create deterministic wallets for multi-owner tests.
pub fn multi_wallets(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            Keypair::from_seed(&seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use starchain::{QueryError, SubmitError, CHALLENGE_WINDOW_SECS};

    #[test]
    fn test_fixture_claim_flow() {
        let fixture = TestFixture::with_seed([0x42; 32]);
        let block = fixture.submit("fixture star");

        assert_eq!(block.height, 1);
        assert_eq!(fixture.registry.height(), 1);
        assert!(fixture.registry.validate_chain().is_empty());

        let claims = fixture.registry.claims_by_owner(&fixture.address()).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].star.story, "fixture star");
    }

    #[test]
    fn test_manual_clock_drives_expiry() {
        let fixture = TestFixture::new();
        let message = fixture
            .registry
            .request_ownership_challenge(&fixture.address());
        let signature = fixture.wallet.sign(&message);

        fixture.clock.advance(CHALLENGE_WINDOW_SECS + 1);
        let result = fixture.registry.submit_claim(
            fixture.address(),
            message,
            signature,
            sample_star("late"),
        );
        assert!(matches!(result, Err(SubmitError::ExpiredChallenge { .. })));
    }

    #[test]
    fn test_multi_wallets_are_distinct() {
        let wallets = multi_wallets(3);
        let addresses: Vec<_> = wallets.iter().map(|w| w.address()).collect();
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_ne!(addresses[0], addresses[2]);
    }

    #[test]
    fn test_fixture_separates_owners() {
        let fixture = TestFixture::new();
        let other = Keypair::generate();

        fixture.submit("mine");
        fixture.submit_for(&other, "theirs");

        let claims = fixture.registry.claims_by_owner(&other.address()).unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].star.story, "theirs");

        assert_eq!(
            fixture
                .registry
                .claims_by_owner(&WalletAddress::new("unknown")),
            Err(QueryError::NotFound)
        );
    }
}
