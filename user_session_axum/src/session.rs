use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::{StatusCode, request::Parts};

/// Anonymous session identifier for the current request, available as an
/// Axum extractor.
///
/// The [`track_session`](crate::track_session) middleware inserts this
/// into the request extensions: for returning visitors it is the uid
/// carried in their verified cookie, for everyone else it is the freshly
/// minted uid that the response's `Set-Cookie` will carry.
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use user_session_axum::SessionId;
///
/// async fn handler(session: SessionId) -> String {
///     format!("your session: {session}")
/// }
///
/// let app: Router = Router::new().route("/", get(handler));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SessionId>().cloned().ok_or_else(|| {
            tracing::error!("SessionId extension missing; is the track_session middleware installed?");
            (StatusCode::INTERNAL_SERVER_ERROR, "session middleware not installed")
        })
    }
}

impl<S> OptionalFromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<SessionId>().cloned())
    }
}
