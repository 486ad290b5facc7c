//! Keyed signing and verification of session identity.
//!
//! The signature binds the pair (uid, issue time) under the process secret,
//! making the cookie self-authenticating without server-side state.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::SessionError;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex HMAC-SHA-256 digest over `"{uid}.{issued_at}"`.
///
/// Deterministic for a fixed secret; any change to uid, issue time, or
/// secret yields a different digest.
pub fn sign(uid: &str, issued_at: i64, secret: &[u8]) -> Result<String, SessionError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|_| SessionError::Crypto("Failed to initialize HMAC".to_string()))?;
    mac.update(format!("{uid}.{issued_at}").as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(hex::encode(digest))
}

/// Check a presented signature against the expected one.
///
/// The comparison is constant-time in the digest contents; a length
/// mismatch short-circuits on the (public) lengths only. Faults while
/// recomputing the digest count as verification failure, never a panic.
pub fn verify(uid: &str, issued_at: i64, signature: &str, secret: &[u8]) -> bool {
    match sign(uid, issued_at, secret) {
        Ok(expected) => expected.as_bytes().ct_eq(signature.as_bytes()).into(),
        Err(_) => false,
    }
}
