pub mod auth;
pub mod health;
pub mod market;
pub mod stats;
pub mod trades;

use crate::AppState;
use axum::Router;
use serde::Serialize;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/trades", trades::router())
        .nest("/api/stats", stats::router())
        .nest("/api/market", market::router())
}
