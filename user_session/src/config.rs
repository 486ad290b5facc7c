//! Process-wide session configuration.
//!
//! Read once from the environment at startup and passed by reference into
//! the signer, policy, and orchestration functions, so the core stays
//! testable with injected parameters.

use std::env;

use crate::errors::SessionError;

pub const DEFAULT_COOKIE_NAME: &str = "user-session";
/// 30 days.
pub const DEFAULT_MAX_AGE_SECONDS: u64 = 2_592_000;
pub const DEFAULT_RENEW_WINDOW_DAYS: u64 = 10;

/// Minimum accepted secret length in bytes.
const MIN_SECRET_LEN: usize = 16;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session value.
    pub cookie_name: String,
    /// HMAC key material. At least [`MIN_SECRET_LEN`] bytes.
    pub secret: Vec<u8>,
    /// Total validity duration of a session.
    pub max_age_seconds: u64,
    /// Trailing window before expiry during which a session is reissued.
    pub renew_window_days: u64,
    /// Controls the `Secure` cookie attribute.
    pub is_production: bool,
}

impl SessionConfig {
    /// Create a configuration with default policy parameters.
    ///
    /// Fails when the secret is shorter than the enforced minimum; a weak
    /// default is never substituted.
    pub fn new(secret: Vec<u8>) -> Result<Self, SessionError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionError::Config(format!(
                "session secret must be at least {MIN_SECRET_LEN} bytes, got {}",
                secret.len()
            )));
        }
        Ok(Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secret,
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            renew_window_days: DEFAULT_RENEW_WINDOW_DAYS,
            is_production: false,
        })
    }

    /// Load the configuration from the environment.
    ///
    /// `COOKIE_SECRET` is required; the remaining variables fall back to
    /// their defaults when unset or unparsable:
    ///
    /// * `SESSION_COOKIE_NAME` - cookie name, default `user-session`
    /// * `SESSION_MAX_AGE_SECONDS` - must be positive, default 2592000 (30d)
    /// * `SESSION_RENEW_WINDOW_DAYS` - must be non-negative, default 10
    /// * `APP_ENV` - `production` enables the `Secure` cookie attribute
    pub fn from_env() -> Result<Self, SessionError> {
        let secret = env::var("COOKIE_SECRET")
            .map_err(|_| SessionError::Config("COOKIE_SECRET is not set".to_string()))?;
        let mut config = Self::new(secret.into_bytes())?;

        if let Ok(name) = env::var("SESSION_COOKIE_NAME") {
            config.cookie_name = name;
        }
        config.max_age_seconds = env::var("SESSION_MAX_AGE_SECONDS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|n| *n > 0)
            .map_or(DEFAULT_MAX_AGE_SECONDS, |n| n as u64);
        config.renew_window_days = env::var("SESSION_RENEW_WINDOW_DAYS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|n| *n >= 0)
            .map_or(DEFAULT_RENEW_WINDOW_DAYS, |n| n as u64);
        config.is_production = env::var("APP_ENV").is_ok_and(|v| v == "production");

        Ok(config)
    }
}
