use crate::sources::binance;
use std::env;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Base URL of the hosted backend (trade store + auth).
    pub store_url: String,
    /// API key for the hosted backend.
    pub store_api_key: String,
    /// Base URL of the market data feed.
    pub market_api_url: String,
    /// Quote currency used to filter the symbol universe.
    pub quote_currency: String,
    /// Pairs polled for live prices.
    pub watched_pairs: Vec<String>,
    /// Live price poll interval in seconds.
    pub poll_interval_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        // Format: "BTC/USDT,ETH/USDT"
        let watched_pairs = env::var("WATCHED_PAIRS")
            .ok()
            .map(|s| parse_pairs(&s))
            .filter(|pairs| !pairs.is_empty())
            .unwrap_or_else(default_watched_pairs);

        Self {
            host,
            port,
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:54321".to_string()),
            store_api_key: env::var("STORE_API_KEY").unwrap_or_default(),
            market_api_url: env::var("MARKET_API_URL")
                .unwrap_or_else(|_| binance::DEFAULT_API_URL.to_string()),
            quote_currency: env::var("QUOTE_CURRENCY").unwrap_or_else(|_| "USDT".to_string()),
            watched_pairs,
            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

fn parse_pairs(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_uppercase())
        .filter(|p| !p.is_empty())
        .collect()
}

fn default_watched_pairs() -> Vec<String> {
    ["BTC/USDT", "ETH/USDT", "XRP/USDT", "SOL/USDT", "FIL/USDT"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}
