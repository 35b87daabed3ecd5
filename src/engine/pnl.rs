//! Per-trade result computation.
//!
//! A trade plus a reference price yields an absolute result in quote
//! currency and a percentage return. The reference price is the stored exit
//! for a closed trade and a live quote for an open one; `mark` hides that
//! distinction so callers never need to know which case applies.

use crate::types::{PositionSide, Trade};
use serde::Serialize;

/// Result of marking a single trade against a reference price.
///
/// Both figures always share the same sign. Values are unrounded; aggregation
/// accumulates them as-is and rounding happens only at presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOutcome {
    /// Absolute PnL in quote currency.
    pub result: f64,
    /// Percentage return on the entry price.
    pub result_pct: f64,
}

impl TradeOutcome {
    /// Presentation form: two decimal places on both figures.
    pub fn rounded(&self) -> TradeOutcome {
        TradeOutcome {
            result: round2(self.result),
            result_pct: round2(self.result_pct),
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A usable price or amount: finite and strictly positive.
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Compute the result of a trade against a reference price.
///
/// Returns `None` when entry price, notional amount, or reference price is
/// missing, zero, or non-finite. That is a valid "unknown" state, never an
/// error, and never NaN or infinity.
pub fn compute_result(trade: &Trade, reference_price: f64) -> Option<TradeOutcome> {
    let entry = positive(trade.entry_price)?;
    let amount = positive(trade.notional_amount)?;
    let reference = positive(Some(reference_price))?;

    let delta = match trade.position_side {
        PositionSide::Short => entry - reference,
        PositionSide::Long => reference - entry,
    };

    let leverage = trade.effective_leverage();
    Some(TradeOutcome {
        result: delta * amount / entry * leverage,
        result_pct: delta / entry * 100.0 * leverage,
    })
}

/// Pick the price to mark a trade against.
///
/// Closed trades use their stored exit price; open trades use the live feed.
/// Returns `None` when the trade is open and no live price is known.
pub fn resolve_reference_price<F>(trade: &Trade, live_price: F) -> Option<f64>
where
    F: Fn(&str) -> Option<f64>,
{
    if trade.is_closed() {
        trade.exit_price
    } else {
        live_price(&trade.pair)
    }
}

/// Mark a trade: resolve its reference price, then compute the result.
///
/// The single code path used by the table, the stat cards, and the charts.
pub fn mark<F>(trade: &Trade, live_price: F) -> Option<TradeOutcome>
where
    F: Fn(&str) -> Option<f64>,
{
    let reference = resolve_reference_price(trade, live_price)?;
    compute_result(trade, reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InstrumentType, Strategy};
    use chrono::NaiveDate;

    fn trade(
        instrument_type: InstrumentType,
        position_side: PositionSide,
        entry: f64,
        amount: f64,
        leverage: Option<u32>,
    ) -> Trade {
        Trade {
            id: "t-1".to_string(),
            user_id: "u-1".to_string(),
            pair: "BTC/USDT".to_string(),
            instrument_type,
            position_side,
            entry_price: Some(entry),
            exit_price: None,
            expected_exit_price: None,
            notional_amount: Some(amount),
            leverage,
            strategy: Strategy::Swing,
            notes: None,
            open_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            close_date: None,
            result: None,
            result_pct: None,
        }
    }

    #[test]
    fn test_long_spot_profit() {
        let t = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        let outcome = compute_result(&t, 110.0).unwrap().rounded();
        assert_eq!(outcome.result, 100.00);
        assert_eq!(outcome.result_pct, 10.00);
    }

    #[test]
    fn test_short_spot_mirrors_long() {
        let long = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        let short = trade(InstrumentType::Spot, PositionSide::Short, 100.0, 1000.0, None);

        let l = compute_result(&long, 110.0).unwrap();
        let s = compute_result(&short, 110.0).unwrap();
        assert_eq!(l.result, -s.result);
        assert_eq!(l.result_pct, -s.result_pct);

        let rounded = s.rounded();
        assert_eq!(rounded.result, -100.00);
        assert_eq!(rounded.result_pct, -10.00);
    }

    #[test]
    fn test_reference_at_entry_is_flat() {
        let t = trade(InstrumentType::Spot, PositionSide::Long, 250.0, 4000.0, None);
        let outcome = compute_result(&t, 250.0).unwrap();
        assert_eq!(outcome.result, 0.0);
        assert_eq!(outcome.result_pct, 0.0);
    }

    #[test]
    fn test_futures_leverage_scales_both_figures() {
        let t1 = trade(InstrumentType::Futures, PositionSide::Long, 100.0, 500.0, Some(1));
        let t5 = trade(InstrumentType::Futures, PositionSide::Long, 100.0, 500.0, Some(5));

        let base = compute_result(&t1, 90.0).unwrap();
        let levered = compute_result(&t5, 90.0).unwrap();
        assert_eq!(levered.result, base.result * 5.0);
        assert_eq!(levered.result_pct, base.result_pct * 5.0);

        let rounded = levered.rounded();
        assert_eq!(rounded.result, -250.00);
        assert_eq!(rounded.result_pct, -50.00);
    }

    #[test]
    fn test_spot_ignores_leverage() {
        let plain = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        let levered = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, Some(20));
        assert_eq!(
            compute_result(&plain, 110.0),
            compute_result(&levered, 110.0)
        );
    }

    #[test]
    fn test_missing_or_zero_inputs_give_no_result() {
        let mut t = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        t.entry_price = None;
        assert!(compute_result(&t, 110.0).is_none());

        t.entry_price = Some(0.0);
        assert!(compute_result(&t, 110.0).is_none());

        t.entry_price = Some(f64::NAN);
        assert!(compute_result(&t, 110.0).is_none());

        t.entry_price = Some(100.0);
        t.notional_amount = Some(0.0);
        assert!(compute_result(&t, 110.0).is_none());

        t.notional_amount = Some(1000.0);
        assert!(compute_result(&t, 0.0).is_none());
        assert!(compute_result(&t, f64::INFINITY).is_none());
    }

    #[test]
    fn test_resolver_prefers_exit_for_closed_trades() {
        let mut t = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        t.exit_price = Some(120.0);
        t.close_date = NaiveDate::from_ymd_opt(2024, 1, 5);

        // Live price is present but must not be used
        let price = resolve_reference_price(&t, |_| Some(999.0));
        assert_eq!(price, Some(120.0));
    }

    #[test]
    fn test_resolver_uses_live_price_for_open_trades() {
        let mut t = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        // Exit without close date keeps the trade open
        t.exit_price = Some(120.0);

        let price = resolve_reference_price(&t, |pair| {
            assert_eq!(pair, "BTC/USDT");
            Some(105.0)
        });
        assert_eq!(price, Some(105.0));

        assert!(resolve_reference_price(&t, |_| None).is_none());
    }

    #[test]
    fn test_mark_is_resolve_then_compute() {
        let t = trade(InstrumentType::Spot, PositionSide::Long, 100.0, 1000.0, None);
        let outcome = mark(&t, |_| Some(110.0)).unwrap().rounded();
        assert_eq!(outcome.result, 100.00);

        // Unknown price propagates as no result, not zero
        assert!(mark(&t, |_| None).is_none());
    }

    #[test]
    fn test_rounding_is_presentation_only() {
        let t = trade(InstrumentType::Spot, PositionSide::Long, 3.0, 10.0, None);
        let outcome = compute_result(&t, 4.0).unwrap();
        // Raw value keeps full precision
        assert!((outcome.result - 10.0 / 3.0).abs() < 1e-12);
        assert_eq!(outcome.rounded().result, 3.33);
    }
}
