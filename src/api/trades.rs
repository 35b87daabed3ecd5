//! Trades API
//!
//! CRUD over journaled trades plus the close action:
//! - GET /api/trades - List the session owner's trades, marked against live prices
//! - POST /api/trades - Record a new trade
//! - POST /api/trades/:id/close - Close an open trade at a given exit price
//! - DELETE /api/trades/:id - Delete a trade
//!
//! The store is the source of truth: every mutation responds with a fresh
//! list read back from it, never with a locally patched copy.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::auth::Authenticated;
use crate::api::ApiResponse;
use crate::engine::{compute_result, mark, TradeOutcome};
use crate::error::{AppError, Result};
use crate::services::PriceCache;
use crate::types::{NewTrade, Trade};
use crate::AppState;

/// Create trades router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trades))
        .route("/", post(create_trade))
        .route("/:id/close", post(close_trade))
        .route("/:id", delete(delete_trade))
}

/// A trade plus its marked result for display.
///
/// `marked` carries the engine's rounded outcome (exit price for closed
/// trades, live quote for open ones) and is `null` when indeterminate.
#[derive(Debug, Serialize)]
pub struct TradeView {
    #[serde(flatten)]
    pub trade: Trade,
    pub marked: Option<TradeOutcome>,
}

/// Close request: the confirmed exit price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseRequest {
    pub exit_price: f64,
}

fn mark_all(trades: Vec<Trade>, price_cache: &PriceCache) -> Vec<TradeView> {
    trades
        .into_iter()
        .map(|trade| {
            let marked = mark(&trade, |pair| price_cache.get_price(pair)).map(|o| o.rounded());
            TradeView { trade, marked }
        })
        .collect()
}

/// GET /api/trades
async fn list_trades(
    auth: Authenticated,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TradeView>>>> {
    let trades = state.store.list_trades(&auth.session).await?;
    Ok(Json(ApiResponse {
        data: mark_all(trades, &state.price_cache),
    }))
}

/// POST /api/trades
async fn create_trade(
    auth: Authenticated,
    State(state): State<AppState>,
    Json(trade): Json<NewTrade>,
) -> Result<Json<ApiResponse<Vec<TradeView>>>> {
    validate_new_trade(&trade)?;
    state.store.insert_trade(&auth.session, &trade).await?;

    let trades = state.store.list_trades(&auth.session).await?;
    Ok(Json(ApiResponse {
        data: mark_all(trades, &state.price_cache),
    }))
}

/// POST /api/trades/:id/close
///
/// Records the exit price with today's date and caches the recomputed
/// result columns alongside.
async fn close_trade(
    auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CloseRequest>,
) -> Result<Json<ApiResponse<Vec<TradeView>>>> {
    if !(request.exit_price.is_finite() && request.exit_price > 0.0) {
        return Err(AppError::BadRequest(
            "Exit price must be a positive number".to_string(),
        ));
    }

    let trades = state.store.list_trades(&auth.session).await?;
    let trade = trades
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Trade not found: {}", id)))?;

    if trade.is_closed() {
        return Err(AppError::BadRequest(format!("Trade already closed: {}", id)));
    }

    let today = chrono::Utc::now().date_naive();
    let outcome = compute_result(trade, request.exit_price).map(|o| o.rounded());

    let mut fields = json!({
        "exitPrice": request.exit_price,
        "closeDate": today,
    });
    if let Some(outcome) = outcome {
        fields["result"] = json!(outcome.result);
        fields["resultPct"] = json!(outcome.result_pct);
    }

    state.store.update_trade(&auth.session, &id, fields).await?;

    let trades = state.store.list_trades(&auth.session).await?;
    Ok(Json(ApiResponse {
        data: mark_all(trades, &state.price_cache),
    }))
}

/// DELETE /api/trades/:id
async fn delete_trade(
    auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<TradeView>>>> {
    state.store.delete_trade(&auth.session, &id).await?;

    let trades = state.store.list_trades(&auth.session).await?;
    Ok(Json(ApiResponse {
        data: mark_all(trades, &state.price_cache),
    }))
}

/// Form-level validation: required fields present and positive.
fn validate_new_trade(trade: &NewTrade) -> Result<()> {
    if trade.pair.trim().is_empty() {
        return Err(AppError::BadRequest("Pair is required".to_string()));
    }
    match trade.entry_price {
        Some(p) if p.is_finite() && p > 0.0 => {}
        _ => {
            return Err(AppError::BadRequest(
                "Entry price must be a positive number".to_string(),
            ))
        }
    }
    match trade.notional_amount {
        Some(a) if a.is_finite() && a > 0.0 => {}
        _ => {
            return Err(AppError::BadRequest(
                "Amount must be a positive number".to_string(),
            ))
        }
    }
    Ok(())
}
