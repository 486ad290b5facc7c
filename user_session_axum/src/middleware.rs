use std::sync::Arc;

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use chrono::Utc;

use user_session::{
    SessionConfig, SessionDecision, append_session_cookie, evaluate_session,
    session_cookie_from_headers,
};

use super::session::SessionId;

/// Session-tracking middleware.
///
/// Evaluates the request's session cookie, stores the resulting
/// [`SessionId`] in the request extensions for handlers and extractors,
/// and attaches a refreshed `Set-Cookie` to the response when the session
/// is new, invalid, or inside the renewal window.
///
/// Availability never depends on this mechanism: any internal fault is
/// logged and the response passes through unmodified, while an
/// unverifiable cookie is never trusted.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{Router, middleware::from_fn_with_state, routing::get};
/// use user_session_axum::{SessionConfig, track_session};
///
/// let config = Arc::new(SessionConfig::from_env().unwrap());
/// let app: Router = Router::new()
///     .route("/", get(|| async { "hello" }))
///     .layer(from_fn_with_state(config, track_session));
/// ```
pub async fn track_session(
    State(config): State<Arc<SessionConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let now = Utc::now().timestamp();
    let raw = session_cookie_from_headers(req.headers(), &config).map(str::to_owned);

    let outcome = match evaluate_session(raw.as_deref(), now, &config) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!("Session evaluation failed, leaving response unmodified: {err}");
            return next.run(req).await;
        }
    };

    req.extensions_mut().insert(SessionId(outcome.uid));
    let mut response = next.run(req).await;

    if let SessionDecision::IssueNew { uid, issued_at } = outcome.decision {
        if let Err(err) = append_session_cookie(response.headers_mut(), &uid, issued_at, &config) {
            tracing::warn!("Failed to attach session cookie, leaving response unmodified: {err}");
        }
    }

    response
}
