use crate::types::{Candle, CandleInterval};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://api.binance.com/api/v3";

/// Default candle count per chart request.
pub const DEFAULT_CANDLE_LIMIT: usize = 200;

/// Upper bound on any single feed request. A hung request must fail within
/// one poll cycle, not hold the poller hostage.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Ticker price response.
#[derive(Debug, Deserialize)]
struct TickerPrice {
    #[allow(dead_code)]
    symbol: String,
    price: String,
}

/// Exchange info symbol entry.
#[derive(Debug, Deserialize)]
struct SymbolInfo {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

/// Binance REST client for the market data feed.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .user_agent("journal/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    /// Canonical pair (`BTC/USDT`) to exchange symbol (`BTCUSDT`).
    pub fn pair_to_symbol(pair: &str) -> String {
        pair.replace('/', "").to_uppercase()
    }

    /// Fetch the latest trade price for a pair.
    pub async fn get_latest_price(&self, pair: &str) -> anyhow::Result<f64> {
        let url = format!(
            "{}/ticker/price?symbol={}",
            self.base_url,
            Self::pair_to_symbol(pair)
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            let detail: String = text.chars().take(200).collect();
            warn!("Binance ticker returned {}: {}", status, detail);
            anyhow::bail!("Binance API error: {}", status);
        }

        let ticker: TickerPrice = response.json().await?;
        let price: f64 = ticker.price.parse()?;
        if !(price.is_finite() && price > 0.0) {
            anyhow::bail!("Binance returned unusable price for {}: {}", pair, ticker.price);
        }
        Ok(price)
    }

    /// Fetch historical OHLC bars for a pair and interval.
    pub async fn get_candles(
        &self,
        pair: &str,
        interval: CandleInterval,
        limit: usize,
    ) -> anyhow::Result<Vec<Candle>> {
        let url = format!(
            "{}/klines?symbol={}&interval={}&limit={}",
            self.base_url,
            Self::pair_to_symbol(pair),
            interval,
            limit
        );
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Binance API error: {}", status);
        }

        // Kline rows are mixed-type arrays: [openTime, "open", "high", "low", "close", ...]
        let rows: Vec<Vec<Value>> = response.json().await?;
        Ok(rows.iter().filter_map(|row| parse_kline(row)).collect())
    }

    /// List tradeable pairs ending in the given quote currency, formatted as
    /// `BASE/QUOTE` for autocomplete.
    pub async fn list_symbols(&self, quote: &str) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/exchangeInfo", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Binance API error: {}", status);
        }

        let info: ExchangeInfo = response.json().await?;
        let quote_upper = quote.to_uppercase();
        Ok(info
            .symbols
            .iter()
            .filter_map(|s| {
                s.symbol
                    .strip_suffix(&quote_upper)
                    .filter(|base| !base.is_empty())
                    .map(|base| format!("{}/{}", base, quote_upper))
            })
            .collect())
    }
}

fn parse_kline(row: &[Value]) -> Option<Candle> {
    let time = row.first()?.as_i64()? / 1000;
    let field = |i: usize| row.get(i)?.as_str()?.parse::<f64>().ok();
    Some(Candle {
        time,
        open: field(1)?,
        high: field(2)?,
        low: field(3)?,
        close: field(4)?,
    })
}
