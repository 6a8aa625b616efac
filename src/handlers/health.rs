use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::prompts::PROMPT_VERSION;
use crate::state::AppState;

// Liveness plus a little limiter and prompt context for operators
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "prompt_version": PROMPT_VERSION,
        "tracked_clients": state.rate_limiter.tracked(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
