use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// Secret missing or too short. Raised once at startup, never per request.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed cookie: {0}")]
    MalformedCookie(String),

    #[error("Signature mismatch")]
    SignatureMismatch,

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}
