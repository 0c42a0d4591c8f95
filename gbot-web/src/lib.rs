//! # gbot-web
//!
//! Web-chat transport: a stateless request/response endpoint over the dialogue engine plus a
//! health probe. Quick-reply options come back as plain labels for the host page to render
//! as buttons; the session id is minted here when the client does not have one yet.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use dialogue::DialogueEngine;
use gbot_core::Reply;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct ChatRequest {
    session_id: Option<String>,
    text: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    session_id: String,
    replies: Vec<Reply>,
}

/// Builds the router: `POST /chat`, `GET /health`, permissive CORS.
pub fn router(engine: Arc<DialogueEngine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn chat(
    State(engine): State<Arc<DialogueEngine>>,
    Json(body): Json<ChatRequest>,
) -> impl IntoResponse {
    let session_id = body
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    match engine.handle(&session_id, &body.text).await {
        Ok(replies) => (
            StatusCode::OK,
            Json(ChatResponse {
                session_id,
                replies,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, session_id = %session_id, "Chat handling failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal error" })),
            )
                .into_response()
        }
    }
}

/// Binds the listener and serves the router until shutdown.
pub async fn run_web(engine: Arc<DialogueEngine>, port: u16) -> anyhow::Result<()> {
    let app = router(engine);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Web chat endpoint listening");
    axum::serve(listener, app).await?;
    Ok(())
}
