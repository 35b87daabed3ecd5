//! Key-casing transform for the store boundary.
//!
//! The store speaks snake_case columns, the in-memory model speaks camelCase.
//! One pure, total, invertible mapping handles every field; no field is
//! special-cased. The two directions are inverses for any key set without
//! ambiguous boundaries (no consecutive capitals, no leading underscores).

use serde_json::{Map, Value};

/// camelCase -> snake_case for a single key.
fn snake_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// snake_case -> camelCase for a single key.
fn camel_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn map_keys(value: Value, f: fn(&str) -> String) -> Value {
    match value {
        Value::Object(obj) => {
            let mapped: Map<String, Value> =
                obj.into_iter().map(|(k, v)| (f(&k), v)).collect();
            Value::Object(mapped)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|v| map_keys(v, f)).collect())
        }
        other => other,
    }
}

/// Rewrite object keys to the store's snake_case wire form.
pub fn to_snake_keys(value: Value) -> Value {
    map_keys(value, snake_key)
}

/// Rewrite object keys to the in-memory camelCase form.
pub fn to_camel_keys(value: Value) -> Value {
    map_keys(value, camel_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_keys() {
        let wire = to_snake_keys(json!({
            "entryPrice": 100.0,
            "expectedExitPrice": null,
            "openDate": "2024-01-10",
            "pair": "BTC/USDT",
        }));
        assert_eq!(
            wire,
            json!({
                "entry_price": 100.0,
                "expected_exit_price": null,
                "open_date": "2024-01-10",
                "pair": "BTC/USDT",
            })
        );
    }

    #[test]
    fn test_camel_keys() {
        let app = to_camel_keys(json!({
            "result_pct": 10.0,
            "close_date": "2024-01-12",
            "notes": "scaled in twice",
        }));
        assert_eq!(
            app,
            json!({
                "resultPct": 10.0,
                "closeDate": "2024-01-12",
                "notes": "scaled in twice",
            })
        );
    }

    #[test]
    fn test_round_trip_is_identity() {
        let original = json!({
            "id": "t-1",
            "userId": "u-1",
            "entryPrice": 100.0,
            "expectedExitPrice": 120.0,
            "notionalAmount": 1000.0,
            "instrumentType": "Futures",
            "positionSide": "Long",
            "resultPct": 0.0,
        });
        assert_eq!(to_camel_keys(to_snake_keys(original.clone())), original);

        let wire = json!({
            "entry_price": 1.0,
            "open_date": "2024-01-01",
            "result_pct": 2.0,
        });
        assert_eq!(to_snake_keys(to_camel_keys(wire.clone())), wire);
    }

    #[test]
    fn test_rows_mapped_elementwise() {
        let rows = to_camel_keys(json!([
            {"entry_price": 1.0},
            {"close_date": null},
        ]));
        assert_eq!(
            rows,
            json!([
                {"entryPrice": 1.0},
                {"closeDate": null},
            ])
        );
    }

    #[test]
    fn test_values_pass_through_untouched() {
        // Only keys change; string values that look like keys do not
        let wire = to_snake_keys(json!({"notes": "entryPrice went up"}));
        assert_eq!(wire, json!({"notes": "entryPrice went up"}));
    }
}
