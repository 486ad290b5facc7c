//! Cookie wire codec.
//!
//! The entire externally visible session state is one cookie value of the
//! form `"{uid}.{issued_at}.{sig}"`. Parsing here is pure syntax
//! validation; authenticity is checked separately by the signature module
//! so that forged-but-well-formed values still go through verification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SessionError;

/// The three fields carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTicket {
    pub uid: String,
    /// Unix seconds. Strictly positive on any value accepted from the wire.
    pub issued_at: i64,
    pub sig: String,
}

impl fmt::Display for SessionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.uid, self.issued_at, self.sig)
    }
}

impl FromStr for SessionTicket {
    type Err = SessionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() != 3 {
            return Err(SessionError::MalformedCookie(format!(
                "expected 3 segments, got {}",
                parts.len()
            )));
        }
        let (uid, issued_at_str, sig) = (parts[0], parts[1], parts[2]);
        if uid.is_empty() || sig.is_empty() {
            return Err(SessionError::MalformedCookie(
                "empty uid or signature segment".to_string(),
            ));
        }
        let issued_at: i64 = issued_at_str.parse().map_err(|_| {
            SessionError::MalformedCookie("issue time is not an integer".to_string())
        })?;
        if issued_at <= 0 {
            return Err(SessionError::MalformedCookie(
                "issue time must be positive".to_string(),
            ));
        }
        Ok(Self {
            uid: uid.to_string(),
            issued_at,
            sig: sig.to_string(),
        })
    }
}
