use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::state::AppState;

// Serves the static front page
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.index_file).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::warn!(path = %state.index_file.display(), error = %e, "index page unavailable");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}
