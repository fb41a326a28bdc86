//! Route handlers for the Daybook API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use daybook_chat::DecisionKind;
use daybook_core::RecordRef;

use crate::error::ApiError;
use crate::state::AppState;

/// Longest accepted chat message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub decision: DecisionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<RecordRef>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /chat - route one message and return the reply.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(req) = payload?;

    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }
    let len = req.message.chars().count();
    if len > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "message is {} characters; the limit is {}",
            len, MAX_MESSAGE_CHARS
        )));
    }

    let reply = state.router.route(&req.message).await;
    tracing::debug!(decision = %reply.decision, "chat request handled");

    Ok(Json(ChatResponse {
        reply: reply.text,
        decision: reply.decision,
        created: reply.created,
    }))
}
