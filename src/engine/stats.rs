//! Portfolio statistics.
//!
//! Reduces a trade collection into the aggregate figures the summary cards
//! and charts consume. Closed trades are recomputed from their stored prices
//! through the same `mark` path as everything else; cached result columns
//! are never trusted here.

use crate::engine::pnl::{mark, TradeOutcome};
use crate::types::Trade;
use chrono::NaiveDate;
use serde::Serialize;

/// Assumed starting capital when no closed trade provides one.
///
/// The growth figure divides net PnL by the notional of the earliest closed
/// trade, falling back to this constant. A documented approximation, not a
/// capital-tracking model.
pub const DEFAULT_INITIAL_CAPITAL: f64 = 1000.0;

/// A single trade singled out by the aggregation (best/worst).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeHighlight {
    pub id: String,
    pub pair: String,
    pub result: f64,
    pub result_pct: f64,
}

/// One point of the cumulative PnL series (equity curve source).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlPoint {
    pub date: NaiveDate,
    pub pnl: f64,
}

/// Summed result per pair (proportion chart source).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairPnl {
    pub pair: String,
    pub pnl: f64,
}

/// Aggregate performance statistics over a trade collection.
///
/// Figures are unrounded; `null` fields mean "undefined" (no closed trades)
/// and render as a neutral placeholder, never as zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// All trades, open and closed.
    pub total_trades: usize,
    pub open_trades_count: usize,
    /// Sum of positive closed results.
    pub total_profit: f64,
    /// Sum of negative closed results, kept negative.
    pub total_loss: f64,
    pub net_pnl: f64,
    /// Winning closed trades as a percentage; 0 with no closed trades.
    pub win_rate: f64,
    pub best_pair: Option<String>,
    pub best_trade: Option<TradeHighlight>,
    pub worst_trade: Option<TradeHighlight>,
    /// Best by percentage return, ranked independently of `best_trade`.
    pub best_trade_pct: Option<TradeHighlight>,
    pub growth_pct: f64,
    pub avg_holding_days: Option<f64>,
    /// Closed trades by ascending close date, running sum of results. The
    /// last point equals `net_pnl`.
    pub cumulative_pnl_series: Vec<PnlPoint>,
    pub pnl_by_pair: Vec<PairPnl>,
}

struct ClosedTrade<'a> {
    trade: &'a Trade,
    outcome: TradeOutcome,
}

/// Reduce a trade collection into portfolio statistics.
///
/// A malformed trade never fails the aggregation: it is excluded from the
/// sums but still counted in the totals.
pub fn aggregate<F>(trades: &[Trade], live_price: F) -> Stats
where
    F: Fn(&str) -> Option<f64>,
{
    let total_trades = trades.len();
    let open_trades_count = trades.iter().filter(|t| !t.is_closed()).count();

    // Closed trades with a computable result, input order preserved.
    let closed: Vec<ClosedTrade> = trades
        .iter()
        .filter(|t| t.is_closed())
        .filter_map(|trade| mark(trade, &live_price).map(|outcome| ClosedTrade { trade, outcome }))
        .collect();

    let mut total_profit = 0.0;
    let mut total_loss = 0.0;
    let mut wins = 0usize;
    let mut pnl_by_pair: Vec<PairPnl> = Vec::new();

    for entry in &closed {
        if entry.outcome.result > 0.0 {
            total_profit += entry.outcome.result;
            wins += 1;
        } else if entry.outcome.result < 0.0 {
            total_loss += entry.outcome.result;
        }

        match pnl_by_pair.iter_mut().find(|p| p.pair == entry.trade.pair) {
            Some(pair) => pair.pnl += entry.outcome.result,
            None => pnl_by_pair.push(PairPnl {
                pair: entry.trade.pair.clone(),
                pnl: entry.outcome.result,
            }),
        }
    }

    let net_pnl = total_profit + total_loss;

    let win_rate = if closed.is_empty() {
        0.0
    } else {
        wins as f64 / closed.len() as f64 * 100.0
    };

    // Strict comparisons keep the first encountered on ties.
    let best_pair = pnl_by_pair
        .iter()
        .fold(None::<&PairPnl>, |best, p| match best {
            Some(b) if p.pnl <= b.pnl => Some(b),
            _ => Some(p),
        })
        .map(|p| p.pair.clone());

    let best_trade = pick(&closed, |a, b| a.outcome.result > b.outcome.result);
    let worst_trade = pick(&closed, |a, b| a.outcome.result < b.outcome.result);
    let best_trade_pct = pick(&closed, |a, b| a.outcome.result_pct > b.outcome.result_pct);

    let initial_capital = closed
        .iter()
        .fold(None::<&ClosedTrade>, |earliest, entry| match earliest {
            Some(e) if entry.trade.open_date >= e.trade.open_date => Some(e),
            _ => Some(entry),
        })
        .and_then(|entry| entry.trade.notional_amount)
        .unwrap_or(DEFAULT_INITIAL_CAPITAL);
    let growth_pct = net_pnl / initial_capital * 100.0;

    // Holding duration counts every closed trade, computable result or not.
    let holding: Vec<i64> = trades
        .iter()
        .filter(|t| t.is_closed())
        .filter_map(|t| t.holding_days())
        .collect();
    let avg_holding_days = if holding.is_empty() {
        None
    } else {
        Some(holding.iter().sum::<i64>() as f64 / holding.len() as f64)
    };

    // Equity curve: stable sort by close date, then running sum.
    let mut by_close: Vec<&ClosedTrade> = closed.iter().collect();
    by_close.sort_by_key(|entry| entry.trade.close_date);
    let mut running = 0.0;
    let cumulative_pnl_series = by_close
        .iter()
        .map(|entry| {
            running += entry.outcome.result;
            PnlPoint {
                date: entry.trade.close_date.unwrap_or(entry.trade.open_date),
                pnl: running,
            }
        })
        .collect();

    Stats {
        total_trades,
        open_trades_count,
        total_profit,
        total_loss,
        net_pnl,
        win_rate,
        best_pair,
        best_trade,
        worst_trade,
        best_trade_pct,
        growth_pct,
        avg_holding_days,
        cumulative_pnl_series,
        pnl_by_pair,
    }
}

fn pick(
    closed: &[ClosedTrade<'_>],
    better: impl Fn(&ClosedTrade<'_>, &ClosedTrade<'_>) -> bool,
) -> Option<TradeHighlight> {
    closed
        .iter()
        .fold(None::<&ClosedTrade>, |best, entry| match best {
            Some(b) if !better(entry, b) => Some(b),
            _ => Some(entry),
        })
        .map(|entry| TradeHighlight {
            id: entry.trade.id.clone(),
            pair: entry.trade.pair.clone(),
            result: entry.outcome.result,
            result_pct: entry.outcome.result_pct,
        })
}
