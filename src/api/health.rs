use crate::AppState;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Create health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "journal",
    }))
}
