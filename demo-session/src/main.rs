use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_session_axum::{SessionConfig, SessionId, track_session};

async fn index() -> &'static str {
    "Anonymous session demo. Try GET /whoami to see your session id."
}

async fn whoami(session: SessionId) -> Json<Value> {
    Json(json!({ "uid": session.0 }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup-fatal on a missing or short COOKIE_SECRET.
    let config = Arc::new(SessionConfig::from_env()?);

    let app = Router::new()
        .route("/", get(index))
        .route("/whoami", get(whoami))
        .layer(from_fn_with_state(config, track_session));

    let addr = SocketAddr::from(([0, 0, 0, 0], 3001));
    tracing::debug!("HTTP server listening on {addr}");
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
