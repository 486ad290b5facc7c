use ring::rand::SecureRandom;

use crate::errors::SessionError;

/// Raw identifier length in bytes (128 bits, 32 hex characters encoded).
const UID_LEN: usize = 16;

/// Generate a fresh anonymous session identifier.
///
/// The identifier is drawn from the operating system's secure random source
/// and hex-encoded. It carries no user information and stays stable across
/// renewals of the same session.
pub fn generate_uid() -> Result<String, SessionError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = [0u8; UID_LEN];
    rng.fill(&mut bytes)
        .map_err(|_| SessionError::Crypto("Failed to generate random uid".to_string()))?;
    Ok(hex::encode(bytes))
}
