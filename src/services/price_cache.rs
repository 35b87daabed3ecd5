use crate::types::LivePrice;
use dashmap::DashMap;
use std::sync::Arc;

/// Last-known live price per watched pair.
///
/// Entries are never evicted on fetch failure: widgets keep showing the last
/// known value while polling continues on schedule.
pub struct PriceCache {
    prices: DashMap<String, LivePrice>,
}

impl PriceCache {
    /// Create a new price cache.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            prices: DashMap::new(),
        })
    }

    /// Record a fresh price for a pair.
    pub fn update_price(&self, pair: &str, price: f64) {
        let canonical = pair.to_uppercase();
        self.prices.insert(
            canonical.clone(),
            LivePrice {
                pair: canonical,
                price,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        );
    }

    /// Latest known price for a pair, if any.
    pub fn get_price(&self, pair: &str) -> Option<f64> {
        self.prices.get(&pair.to_uppercase()).map(|p| p.price)
    }

    /// All known prices, sorted by pair for stable presentation.
    pub fn get_all(&self) -> Vec<LivePrice> {
        let mut prices: Vec<LivePrice> =
            self.prices.iter().map(|entry| entry.value().clone()).collect();
        prices.sort_by(|a, b| a.pair.cmp(&b.pair));
        prices
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self {
            prices: DashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_and_get() {
        let cache = PriceCache::new();
        cache.update_price("BTC/USDT", 65000.0);
        assert_eq!(cache.get_price("BTC/USDT"), Some(65000.0));
        assert_eq!(cache.get_price("btc/usdt"), Some(65000.0));
        assert!(cache.get_price("ETH/USDT").is_none());
    }

    #[test]
    fn test_get_all_sorted() {
        let cache = PriceCache::new();
        cache.update_price("ETH/USDT", 2500.0);
        cache.update_price("BTC/USDT", 65000.0);
        let all = cache.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].pair, "BTC/USDT");
        assert_eq!(all[1].pair, "ETH/USDT");
    }

    #[test]
    fn test_latest_write_wins() {
        let cache = PriceCache::new();
        cache.update_price("BTC/USDT", 65000.0);
        cache.update_price("BTC/USDT", 64000.0);
        assert_eq!(cache.get_price("BTC/USDT"), Some(64000.0));
    }
}
