//! HMAC-SHA256 payload signing.
//!
//! The signed input is `"{timestamp}.{body}"`, binding the signature to the
//! delivery time so receivers can reject stale replays.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use clihub_core::error::AppError;
use clihub_core::result::AppResult;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the unix timestamp the payload was signed at.
pub const TIMESTAMP_HEADER: &str = "X-Webhook-Timestamp";
/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Compute the signature header value for a payload at a timestamp.
pub fn sign(secret: &str, timestamp: i64, body: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::internal(format!("invalid webhook secret: {e}")))?;
    mac.update(format!("{timestamp}.{body}").as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(format!("sha256={}", hex::encode(digest)))
}

/// Verify a signature header value against a payload and timestamp.
///
/// Comparison is constant-time. Returns `false` for malformed signatures.
pub fn verify(secret: &str, timestamp: i64, body: &str, signature: &str) -> bool {
    let Some(hex_digest) = signature.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(provided) = hex::decode(hex_digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{timestamp}.{body}").as_bytes());
    mac.verify_slice(&provided).is_ok()
}
