//! Periodic price polling.
//!
//! A poller fetches the watched pairs on a fixed schedule and writes results
//! into the price cache. The handle cancels deterministically: once stopped,
//! a fetch that was already in flight is discarded instead of applied, so a
//! stale response can never overwrite newer state.

use crate::services::PriceCache;
use crate::sources::BinanceClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Handle to a running poller. Dropping the handle does not stop the task;
/// call `stop` on teardown.
pub struct PollerHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the poller. In-flight results are discarded, not applied.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Recurring live-price fetcher for a fixed set of pairs.
pub struct PricePoller;

impl PricePoller {
    /// Start polling. Each cycle is independent: a failed or slow fetch logs
    /// and never blocks the next scheduled cycle.
    pub fn start(
        client: Arc<BinanceClient>,
        cache: Arc<PriceCache>,
        pairs: Vec<String>,
        interval: Duration,
    ) -> PollerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        info!("Starting price polling for {} pairs", pairs.len());
        let task = tokio::spawn(async move {
            // A cycle that overruns its interval skips the missed ticks
            // instead of queueing a burst of catch-up cycles.
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if flag.load(Ordering::SeqCst) {
                    return;
                }

                for pair in &pairs {
                    match client.get_latest_price(pair).await {
                        Ok(price) => {
                            // A response completing after cancellation is stale
                            if flag.load(Ordering::SeqCst) {
                                return;
                            }
                            debug!("Price update: {} = {}", pair, price);
                            cache.update_price(pair, price);
                        }
                        Err(e) => {
                            error!("Price fetch error for {}: {}", pair, e);
                        }
                    }
                }
            }
        });

        PollerHandle { cancelled, task }
    }
}
