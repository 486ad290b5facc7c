//! Per-request session decision and its transport-facing helpers.
//!
//! The decision is modeled as a tagged result rather than performed as an
//! effect, so the transport layer owns a single guarded call site: any
//! fault degrades to "leave the response untouched" while an unverifiable
//! cookie is never trusted.

use http::HeaderMap;
use http::header::{COOKIE, SET_COOKIE};

use crate::config::SessionConfig;
use crate::cookie::SessionTicket;
use crate::errors::SessionError;
use crate::policy::{is_expired, needs_renew};
use crate::signature::{sign, verify};
use crate::uid::generate_uid;

/// What the transport layer should do to the outgoing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionDecision {
    /// Presented cookie is valid and fresh; leave the response alone.
    NoChange,
    /// Attach a newly signed cookie carrying `uid` and `issued_at`.
    IssueNew { uid: String, issued_at: i64 },
}

/// Result of evaluating one request's session state.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The uid attached to this request, carried forward or freshly minted.
    pub uid: String,
    pub decision: SessionDecision,
}

/// Evaluate the presented cookie value against the renewal policy.
///
/// * absent, malformed, or unauthenticated cookie: issue a fresh identity;
/// * valid but fully elapsed: issue a fresh identity (a retained old cookie
///   does not grant unbounded lifetime);
/// * valid and inside the renewal window: reissue the same uid with
///   `issued_at = now`;
/// * valid and fresh: no change.
///
/// The only error path is exhaustion of the entropy source while minting a
/// new uid, or a signing fault at issue time; both are expected to be
/// handled by the transport layer's fail-open guard.
pub fn evaluate_session(
    raw: Option<&str>,
    now: i64,
    config: &SessionConfig,
) -> Result<SessionOutcome, SessionError> {
    let ticket = match raw.map(|value| verified_ticket(value, config)) {
        Some(Ok(ticket)) => ticket,
        Some(Err(err)) => {
            tracing::debug!("Rejecting session cookie: {err}");
            return issue_fresh(now);
        }
        None => return issue_fresh(now),
    };

    if is_expired(ticket.issued_at, now, config.max_age_seconds) {
        tracing::debug!("Session lifetime elapsed, issuing a fresh identity");
        return issue_fresh(now);
    }

    if needs_renew(
        ticket.issued_at,
        now,
        config.max_age_seconds,
        config.renew_window_days,
    ) {
        return Ok(SessionOutcome {
            uid: ticket.uid.clone(),
            decision: SessionDecision::IssueNew {
                uid: ticket.uid,
                issued_at: now,
            },
        });
    }

    Ok(SessionOutcome {
        uid: ticket.uid,
        decision: SessionDecision::NoChange,
    })
}

fn issue_fresh(now: i64) -> Result<SessionOutcome, SessionError> {
    let uid = generate_uid()?;
    Ok(SessionOutcome {
        uid: uid.clone(),
        decision: SessionDecision::IssueNew {
            uid,
            issued_at: now,
        },
    })
}

/// Parse and authenticate a presented cookie value.
///
/// Malformed and unauthenticated values are both treated by the caller as
/// absent, so a forged cookie and a missing one take the same path.
fn verified_ticket(raw: &str, config: &SessionConfig) -> Result<SessionTicket, SessionError> {
    let ticket: SessionTicket = raw.parse()?;
    if !verify(&ticket.uid, ticket.issued_at, &ticket.sig, &config.secret) {
        return Err(SessionError::SignatureMismatch);
    }
    Ok(ticket)
}

/// Extract the raw session cookie value from a request's headers.
pub fn session_cookie_from_headers<'a>(
    headers: &'a HeaderMap,
    config: &SessionConfig,
) -> Option<&'a str> {
    let cookie_header = headers.get(COOKIE)?;
    let Ok(cookie_str) = cookie_header.to_str() else {
        tracing::debug!("Invalid cookie header");
        return None;
    };

    cookie_str.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(name), Some(value)) if name == config.cookie_name => Some(value),
            _ => None,
        }
    })
}

/// Sign, format, and append the session `Set-Cookie` header.
///
/// Attributes: `SameSite=Strict; HttpOnly; Path=/; Max-Age=<max_age>`,
/// plus `Secure` in production deployments.
pub fn append_session_cookie(
    headers: &mut HeaderMap,
    uid: &str,
    issued_at: i64,
    config: &SessionConfig,
) -> Result<(), SessionError> {
    let sig = sign(uid, issued_at, &config.secret)?;
    let ticket = SessionTicket {
        uid: uid.to_string(),
        issued_at,
        sig,
    };

    let mut cookie = format!(
        "{}={ticket}; SameSite=Strict; HttpOnly; Path=/; Max-Age={}",
        config.cookie_name, config.max_age_seconds
    );
    if config.is_production {
        cookie.push_str("; Secure");
    }

    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| SessionError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}
