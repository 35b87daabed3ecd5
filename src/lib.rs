//! Journal - crypto trade journal service with live pricing and portfolio
//! statistics.
//!
//! The PnL engine in [`engine`] is the single place trade arithmetic lives;
//! the store and market feed are remote collaborators reached through
//! [`store`] and [`sources`].

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod sources;
pub mod store;
pub mod types;

use config::Config;
use services::{AuthService, PriceCache};
use sources::BinanceClient;
use std::sync::Arc;
use store::TradeStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<TradeStore>,
    pub market: Arc<BinanceClient>,
    pub price_cache: Arc<PriceCache>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wire up services from configuration.
    pub fn from_config(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            store: Arc::new(TradeStore::new(
                config.store_url.clone(),
                config.store_api_key.clone(),
            )),
            market: Arc::new(BinanceClient::new(config.market_api_url.clone())),
            price_cache: PriceCache::new(),
            auth_service: Arc::new(AuthService::new(
                config.store_url.clone(),
                config.store_api_key.clone(),
            )),
            config,
        }
    }
}

// Re-export commonly used items
pub use engine::{aggregate, compute_result, mark, resolve_reference_price, Stats, TradeOutcome};
pub use types::*;
