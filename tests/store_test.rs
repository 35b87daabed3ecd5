//! Tests for the store boundary
//!
//! Tests cover:
//! - Key-casing transform between wire rows and in-memory trades
//! - Trade/NewTrade serde shape across that boundary
//! - Enum spellings on the wire

use chrono::NaiveDate;
use journal::store::{to_camel_keys, to_snake_keys};
use journal::types::{CandleInterval, InstrumentType, NewTrade, PositionSide, Strategy, Trade};
use serde_json::json;

// =============================================================================
// Casing transform
// =============================================================================

mod casing_tests {
    use super::*;

    #[test]
    fn test_directions_are_inverses() {
        let app = json!({
            "id": "t-1",
            "userId": "u-1",
            "pair": "BTC/USDT",
            "entryPrice": 65000.0,
            "exitPrice": null,
            "expectedExitPrice": 70000.0,
            "notionalAmount": 1000.0,
            "openDate": "2024-01-10",
            "closeDate": null,
            "resultPct": null,
        });
        assert_eq!(to_camel_keys(to_snake_keys(app.clone())), app);

        let wire = to_snake_keys(app.clone());
        assert_eq!(to_snake_keys(to_camel_keys(wire.clone())), wire);
    }

    #[test]
    fn test_single_word_keys_are_fixed_points() {
        let value = json!({"pair": "BTC/USDT", "notes": null, "leverage": 5});
        assert_eq!(to_snake_keys(value.clone()), value);
        assert_eq!(to_camel_keys(value.clone()), value);
    }

    #[test]
    fn test_row_arrays_map_each_element() {
        let rows = json!([
            {"entry_price": 1.0, "result_pct": 10.0},
            {"entry_price": 2.0, "result_pct": null},
        ]);
        let mapped = to_camel_keys(rows);
        assert_eq!(mapped[0]["entryPrice"], 1.0);
        assert_eq!(mapped[1]["resultPct"], serde_json::Value::Null);
    }
}

// =============================================================================
// Trade serde across the boundary
// =============================================================================

mod trade_serde_tests {
    use super::*;

    #[test]
    fn test_wire_row_deserializes_into_trade() {
        // A row exactly as the store returns it, after camelizing keys
        let row = to_camel_keys(json!({
            "id": "5f3c9a60-1111-4222-8333-444455556666",
            "user_id": "u-1",
            "pair": "ETH/USDT",
            "instrument_type": "Futures",
            "position_side": "Short",
            "entry_price": 3200.0,
            "exit_price": 3000.0,
            "expected_exit_price": null,
            "notional_amount": 500.0,
            "leverage": 3,
            "strategy": "DCA",
            "notes": null,
            "open_date": "2024-02-01",
            "close_date": "2024-02-08",
            "result": null,
            "result_pct": null,
        }));

        let trade: Trade = serde_json::from_value(row).unwrap();
        assert_eq!(trade.instrument_type, InstrumentType::Futures);
        assert_eq!(trade.position_side, PositionSide::Short);
        assert_eq!(trade.strategy, Strategy::Dca);
        assert_eq!(trade.leverage, Some(3));
        assert_eq!(
            trade.close_date,
            Some(NaiveDate::from_ymd_opt(2024, 2, 8).unwrap())
        );
        assert!(trade.is_closed());
        assert_eq!(trade.holding_days(), Some(7));
    }

    #[test]
    fn test_new_trade_snakes_into_store_columns() {
        let new_trade = NewTrade {
            pair: "SOL/USDT".to_string(),
            instrument_type: InstrumentType::Spot,
            position_side: PositionSide::Long,
            entry_price: Some(150.0),
            exit_price: None,
            expected_exit_price: None,
            notional_amount: Some(300.0),
            leverage: None,
            strategy: Strategy::Breakout,
            notes: Some("weekly breakout".to_string()),
            open_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            close_date: None,
        };

        let wire = to_snake_keys(serde_json::to_value(&new_trade).unwrap());
        assert_eq!(wire["pair"], "SOL/USDT");
        assert_eq!(wire["entry_price"], 150.0);
        assert_eq!(wire["notional_amount"], 300.0);
        assert_eq!(wire["strategy"], "Breakout");
        assert_eq!(wire["open_date"], "2024-03-01");
        // Absent optionals are explicit nulls on the wire, not missing columns
        assert!(wire.get("exit_price").is_some());
        assert_eq!(wire["exit_price"], serde_json::Value::Null);
        // The store assigns identity; the payload must not carry one
        assert!(wire.get("id").is_none());
        assert!(wire.get("user_id").is_none());
    }

    #[test]
    fn test_enum_wire_spellings() {
        assert_eq!(serde_json::to_value(Strategy::Dca).unwrap(), json!("DCA"));
        assert_eq!(
            serde_json::to_value(InstrumentType::Futures).unwrap(),
            json!("Futures")
        );
        assert_eq!(
            serde_json::to_value(CandleInterval::FourHours).unwrap(),
            json!("4h")
        );
        let interval: CandleInterval = serde_json::from_value(json!("15m")).unwrap();
        assert_eq!(interval, CandleInterval::FifteenMinutes);
    }

    #[test]
    fn test_open_trade_is_not_closed_with_exit_alone() {
        let row = to_camel_keys(json!({
            "id": "t-1",
            "user_id": "u-1",
            "pair": "BTC/USDT",
            "instrument_type": "Spot",
            "position_side": "Long",
            "entry_price": 100.0,
            "exit_price": 110.0,
            "expected_exit_price": null,
            "notional_amount": 1000.0,
            "leverage": null,
            "strategy": "Swing",
            "notes": null,
            "open_date": "2024-01-01",
            "close_date": null,
            "result": null,
            "result_pct": null,
        }));
        let trade: Trade = serde_json::from_value(row).unwrap();
        assert!(!trade.is_closed());
        assert!(trade.holding_days().is_none());
    }
}
