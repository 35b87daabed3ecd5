//! Stats API
//!
//! - GET /api/stats - Aggregate portfolio statistics for the session owner
//!
//! The summary cards, equity curve, and per-pair proportion chart all read
//! from this one payload, so they can never disagree.

use axum::{extract::State, routing::get, Json, Router};

use crate::api::auth::Authenticated;
use crate::api::ApiResponse;
use crate::engine::{aggregate, Stats};
use crate::error::Result;
use crate::AppState;

/// Create stats router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_stats))
}

/// GET /api/stats
async fn get_stats(
    auth: Authenticated,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Stats>>> {
    let trades = state.store.list_trades(&auth.session).await?;
    let stats = aggregate(&trades, |pair| state.price_cache.get_price(pair));
    Ok(Json(ApiResponse { data: stats }))
}
