//! PnL Computation Engine
//!
//! Pure, synchronous trade arithmetic. Every presentation surface (table,
//! stat cards, charts) marks trades through `mark` and reduces collections
//! through `aggregate`; nothing else in the crate re-derives the formulas.

pub mod pnl;
pub mod stats;

pub use pnl::{compute_result, mark, resolve_reference_price, TradeOutcome};
pub use stats::{aggregate, PairPnl, PnlPoint, Stats, TradeHighlight, DEFAULT_INITIAL_CAPITAL};
