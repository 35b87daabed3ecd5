//! Market API
//!
//! Read-only surface over the market data feed and the live price cache:
//! - GET /api/market/prices - All cached live prices
//! - GET /api/market/price?pair=BASE/QUOTE - Latest price for one pair
//! - GET /api/market/candles?pair=&interval=&limit= - OHLC bars for charting
//! - GET /api/market/symbols - Pair universe for autocomplete

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::ApiResponse;
use crate::error::{AppError, Result};
use crate::sources::binance::DEFAULT_CANDLE_LIMIT;
use crate::types::{Candle, CandleInterval, LivePrice};
use crate::AppState;

/// Create market router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/price", get(get_price))
        .route("/candles", get(get_candles))
        .route("/symbols", get(get_symbols))
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub pair: String,
}

#[derive(Debug, Deserialize)]
pub struct CandlesQuery {
    pub pair: String,
    pub interval: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolsQuery {
    pub quote: Option<String>,
}

/// GET /api/market/prices
async fn get_prices(State(state): State<AppState>) -> Json<ApiResponse<Vec<LivePrice>>> {
    Json(ApiResponse {
        data: state.price_cache.get_all(),
    })
}

/// GET /api/market/price?pair=BTC/USDT
///
/// Serves from the cache when warm, otherwise queries the feed directly.
async fn get_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<ApiResponse<LivePrice>>> {
    if let Some(price) = state.price_cache.get_price(&query.pair) {
        return Ok(Json(ApiResponse {
            data: LivePrice {
                pair: query.pair.to_uppercase(),
                price,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        }));
    }

    let price = state
        .market
        .get_latest_price(&query.pair)
        .await
        .map_err(|e| AppError::Feed(e.to_string()))?;
    state.price_cache.update_price(&query.pair, price);

    Ok(Json(ApiResponse {
        data: LivePrice {
            pair: query.pair.to_uppercase(),
            price,
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
    }))
}

/// GET /api/market/candles?pair=BTC/USDT&interval=4h&limit=200
async fn get_candles(
    State(state): State<AppState>,
    Query(query): Query<CandlesQuery>,
) -> Result<Json<ApiResponse<Vec<Candle>>>> {
    let interval = CandleInterval::from_str(&query.interval)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown interval: {}", query.interval)))?;
    let limit = query.limit.unwrap_or(DEFAULT_CANDLE_LIMIT).min(1000);

    let candles = state
        .market
        .get_candles(&query.pair, interval, limit)
        .await
        .map_err(|e| AppError::Feed(e.to_string()))?;

    Ok(Json(ApiResponse { data: candles }))
}

/// GET /api/market/symbols?quote=USDT
async fn get_symbols(
    State(state): State<AppState>,
    Query(query): Query<SymbolsQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let quote = query
        .quote
        .unwrap_or_else(|| state.config.quote_currency.clone());

    let symbols = state
        .market
        .list_symbols(&quote)
        .await
        .map_err(|e| AppError::Feed(e.to_string()))?;

    Ok(Json(ApiResponse { data: symbols }))
}
