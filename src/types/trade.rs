//! Trade Journal Types
//!
//! Types for manually journaled positions: the trade record itself plus the
//! enumerations the entry form offers (instrument type, side, strategy tag).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Instrument type for a journaled trade.
///
/// Leverage only applies to `Futures`; a `Spot` trade ignores any stored
/// leverage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    Spot,
    Futures,
}

impl std::fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentType::Spot => write!(f, "spot"),
            InstrumentType::Futures => write!(f, "futures"),
        }
    }
}

/// Direction of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl std::fmt::Display for PositionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionSide::Long => write!(f, "long"),
            PositionSide::Short => write!(f, "short"),
        }
    }
}

/// Strategy tag attached to a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Scalping,
    Swing,
    #[serde(rename = "DCA")]
    Dca,
    Breakout,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Scalping
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Scalping => write!(f, "scalping"),
            Strategy::Swing => write!(f, "swing"),
            Strategy::Dca => write!(f, "dca"),
            Strategy::Breakout => write!(f, "breakout"),
        }
    }
}

// =============================================================================
// Trade record
// =============================================================================

/// A journaled trade as read from the store.
///
/// Numeric fields are optional: rows with missing or unparseable numbers are
/// still listed, they just produce no result when marked. A trade is closed
/// iff both `exit_price` and `close_date` are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Store-assigned identifier, immutable after creation.
    pub id: String,
    /// Owning user; set once at creation, never user-editable.
    pub user_id: String,
    /// Instrument symbol, canonical `BASE/QUOTE` form (e.g. `BTC/USDT`).
    pub pair: String,
    pub instrument_type: InstrumentType,
    pub position_side: PositionSide,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    /// Informational target only, never used in calculations.
    #[serde(default)]
    pub expected_exit_price: Option<f64>,
    /// Position size in quote currency.
    pub notional_amount: Option<f64>,
    #[serde(default)]
    pub leverage: Option<u32>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub notes: Option<String>,
    pub open_date: NaiveDate,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
    /// Cached absolute PnL written at close time. A cache only: the engine
    /// recomputes the value from prices and must match it.
    #[serde(default)]
    pub result: Option<f64>,
    /// Cached percentage return written at close time.
    #[serde(default)]
    pub result_pct: Option<f64>,
}

impl Trade {
    /// A trade is closed iff both exit price and close date are recorded.
    pub fn is_closed(&self) -> bool {
        self.exit_price.is_some() && self.close_date.is_some()
    }

    /// Leverage multiplier to apply when marking this trade.
    ///
    /// Futures trades use the stored leverage (minimum 1, default 1 when
    /// unset); spot trades are always 1 regardless of the stored value.
    pub fn effective_leverage(&self) -> f64 {
        match self.instrument_type {
            InstrumentType::Futures => self.leverage.map(|l| l.max(1)).unwrap_or(1) as f64,
            InstrumentType::Spot => 1.0,
        }
    }

    /// Whole days the position was held, once closed. Same-day round trips
    /// count as one day.
    pub fn holding_days(&self) -> Option<i64> {
        let close = self.close_date?;
        Some((close - self.open_date).num_days().max(1))
    }
}

/// Payload for creating a trade. The store assigns the id; the session
/// supplies the owner.
///
/// Numeric fields are typed, so an empty form value becomes an explicit
/// `None` and never reaches the wire as an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub pair: String,
    pub instrument_type: InstrumentType,
    pub position_side: PositionSide,
    pub entry_price: Option<f64>,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub expected_exit_price: Option<f64>,
    pub notional_amount: Option<f64>,
    #[serde(default)]
    pub leverage: Option<u32>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub notes: Option<String>,
    pub open_date: NaiveDate,
    #[serde(default)]
    pub close_date: Option<NaiveDate>,
}
