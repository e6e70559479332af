//! The time-bounded ownership challenge protocol.
//!
//! A challenge message embeds the wallet address and its own issuance time:
//! `ADDRESS:TIMESTAMP:starRegistry`. Nothing is tracked server-side, so the
//! window check below is the entire anti-replay contract: a still-unexpired
//! signed message can be replayed within the window. That is the documented
//! behavior, not a gap to harden here.

use crate::crypto::WalletAddress;
use crate::error::SubmitError;

/// How long a challenge message stays valid, in seconds.
pub const CHALLENGE_WINDOW_SECS: u64 = 300;

const SEPARATOR: char = ':';
const SUFFIX: &str = "starRegistry";

/// Build the challenge message for `address` at the given wall-clock time.
///
/// Pure in its inputs; always succeeds.
pub fn challenge_message(address: &WalletAddress, now_secs: u64) -> String {
    format!("{}{}{}{}{}", address, SEPARATOR, now_secs, SEPARATOR, SUFFIX)
}

/// Parse the issuance timestamp out of a challenge message (the second
/// colon-delimited field).
pub fn issued_at(message: &str) -> Result<u64, SubmitError> {
    let field = message
        .split(SEPARATOR)
        .nth(1)
        .ok_or_else(|| SubmitError::MalformedChallenge("missing timestamp field".into()))?;
    field.parse::<u64>().map_err(|_| {
        SubmitError::MalformedChallenge(format!("timestamp field {:?} is not an integer", field))
    })
}

/// Check that `message` is still inside the validity window at `now_secs`.
///
/// A message dated in the future counts as zero elapsed time.
pub fn check_window(message: &str, now_secs: u64) -> Result<(), SubmitError> {
    let issued = issued_at(message)?;
    let elapsed = now_secs.saturating_sub(issued);
    if elapsed > CHALLENGE_WINDOW_SECS {
        return Err(SubmitError::ExpiredChallenge {
            issued_at: issued,
            elapsed,
        });
    }
    Ok(())
}
