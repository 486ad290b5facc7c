//! Integration tests for the session-tracking middleware.
//!
//! Drives a real `Router` through `tower::ServiceExt::oneshot` and asserts
//! on the issued `Set-Cookie` headers and the `SessionId` observed by the
//! handler.

use std::sync::Arc;

use axum::{Router, body::Body, middleware::from_fn_with_state, routing::get};
use chrono::Utc;
use http::{
    Request, StatusCode,
    header::{COOKIE, SET_COOKIE},
};
use tower::ServiceExt;

use user_session::{SessionConfig, sign};
use user_session_axum::{SessionId, track_session};

const DAY: i64 = 86_400;

fn test_config() -> SessionConfig {
    SessionConfig::new(b"test-secret-0123456789abcdef".to_vec()).unwrap()
}

fn test_app(config: SessionConfig) -> Router {
    Router::new()
        .route("/", get(|session: SessionId| async move { session.0 }))
        .layer(from_fn_with_state(Arc::new(config), track_session))
}

fn signed_cookie(uid: &str, issued_at: i64, config: &SessionConfig) -> String {
    let sig = sign(uid, issued_at, &config.secret).unwrap();
    format!("{}={uid}.{issued_at}.{sig}", config.cookie_name)
}

/// Uid carried in a `Set-Cookie` header value.
fn uid_of(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.splitn(2, '=').nth(1))
        .and_then(|value| value.split('.').next())
        .expect("Set-Cookie should carry a session value")
        .to_string()
}

fn is_hex_uid(uid: &str) -> bool {
    uid.len() == 32 && uid.chars().all(|c| c.is_ascii_hexdigit())
}

/// Run one GET through the app; returns the `Set-Cookie` header (if any)
/// and the handler's observed session id.
async fn run_request(app: Router, cookie: Option<String>) -> (Option<String>, String) {
    let mut builder = Request::builder().method("GET").uri("/");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (set_cookie, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_first_visit_issues_cookie() {
    let config = test_config();
    let (set_cookie, body) = run_request(test_app(config), None).await;

    let set_cookie = set_cookie.expect("first visit should set a cookie");
    let uid = uid_of(&set_cookie);
    assert!(is_hex_uid(&uid), "uid should be 32 hex chars, got {uid:?}");
    assert_eq!(body, uid, "handler should observe the freshly minted uid");

    assert!(set_cookie.starts_with("user-session="));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=2592000"));
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_valid_fresh_cookie_is_not_reissued() {
    let config = test_config();
    let cookie = signed_cookie("aabbccdd00112233aabbccdd00112233", Utc::now().timestamp() - DAY, &config);
    let (set_cookie, body) = run_request(test_app(config), Some(cookie)).await;

    assert_eq!(set_cookie, None, "a fresh session must not be reissued");
    assert_eq!(body, "aabbccdd00112233aabbccdd00112233");
}

#[tokio::test]
async fn test_cookie_in_renewal_window_is_reissued_with_same_uid() {
    let config = test_config();
    let cookie = signed_cookie("aabbccdd00112233aabbccdd00112233", Utc::now().timestamp() - 25 * DAY, &config);
    let (set_cookie, body) = run_request(test_app(config), Some(cookie)).await;

    let set_cookie = set_cookie.expect("a near-expiry session should be reissued");
    assert_eq!(uid_of(&set_cookie), "aabbccdd00112233aabbccdd00112233");
    assert_eq!(body, "aabbccdd00112233aabbccdd00112233");
}

#[tokio::test]
async fn test_tampered_cookie_gets_new_identity() {
    let config = test_config();
    let mut cookie = signed_cookie("aabbccdd00112233aabbccdd00112233", Utc::now().timestamp() - DAY, &config);
    let last = if cookie.ends_with('a') { 'b' } else { 'a' };
    cookie.pop();
    cookie.push(last);

    let (set_cookie, body) = run_request(test_app(config), Some(cookie)).await;

    let set_cookie = set_cookie.expect("a tampered cookie should be replaced");
    let uid = uid_of(&set_cookie);
    assert_ne!(uid, "aabbccdd00112233aabbccdd00112233");
    assert!(is_hex_uid(&uid));
    assert_eq!(body, uid);
}

#[tokio::test]
async fn test_garbage_cookie_gets_new_identity() {
    let config = test_config();
    let (set_cookie, body) =
        run_request(test_app(config), Some("user-session=garbage".to_string())).await;

    let set_cookie = set_cookie.expect("a malformed cookie should be replaced");
    let uid = uid_of(&set_cookie);
    assert!(is_hex_uid(&uid));
    assert_eq!(body, uid);
}

#[tokio::test]
async fn test_secure_attribute_in_production() {
    let mut config = test_config();
    config.is_production = true;
    let (set_cookie, _) = run_request(test_app(config), None).await;

    let set_cookie = set_cookie.expect("first visit should set a cookie");
    assert!(set_cookie.contains("; Secure"));
}
