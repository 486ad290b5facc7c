//! user-session - stateless signed-cookie anonymous sessions
//!
//! This crate assigns an anonymous identifier to first-time visitors,
//! authenticates returning visitors via an HMAC signature, and
//! transparently renews the session near expiry, all without server-side
//! session storage. The cookie value `"{uid}.{issued_at}.{sig}"` is the
//! entire externally visible state.
//!
//! The core is purely synchronous: every operation is a pure function or a
//! bounded computation over injected inputs (current Unix time, the
//! process-wide [`SessionConfig`]). Framework adapters live in companion
//! crates.

mod config;
mod cookie;
mod errors;
mod policy;
mod session;
mod signature;
mod uid;

pub use config::{
    DEFAULT_COOKIE_NAME, DEFAULT_MAX_AGE_SECONDS, DEFAULT_RENEW_WINDOW_DAYS, SessionConfig,
};
pub use cookie::SessionTicket;
pub use errors::SessionError;
pub use policy::{is_expired, needs_renew};
pub use session::{
    SessionDecision, SessionOutcome, append_session_cookie, evaluate_session,
    session_cookie_from_headers,
};
pub use signature::{sign, verify};
pub use uid::generate_uid;
