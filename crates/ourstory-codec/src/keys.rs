//! The fixed long-key ↔ short-key table and the recursive key rewriters.

use serde_json::{Map, Value};

/// Long field name to short code. Both columns are unique.
pub const KEY_TABLE: [(&str, &str); 12] = [
    ("partnerName", "p"),
    ("yourName", "y"),
    ("anniversary", "a"),
    ("letter", "l"),
    ("timeline", "t"),
    ("passcode", "c"),
    ("date", "d"),
    ("title", "h"),
    ("description", "m"),
    ("image", "i"),
    ("poeticSummary", "s"),
    ("vaultVideo", "v"),
];

/// Returns the short code for a long field name.
#[must_use]
pub fn short_key(long: &str) -> Option<&'static str> {
    KEY_TABLE
        .iter()
        .find(|(l, _)| *l == long)
        .map(|(_, s)| *s)
}

/// Returns the long field name for a short code.
#[must_use]
pub fn long_key(short: &str) -> Option<&'static str> {
    KEY_TABLE
        .iter()
        .find(|(_, s)| *s == short)
        .map(|(l, _)| *l)
}

/// Rewrites every mapping key depth-first to its short code. Keys absent from
/// the table pass through unchanged.
#[must_use]
pub fn minify(value: &Value) -> Value {
    rewrite_keys(value, short_key)
}

/// Rewrites every mapping key depth-first back to its long name. Keys absent
/// from the table pass through unchanged.
#[must_use]
pub fn restore(value: &Value) -> Value {
    rewrite_keys(value, long_key)
}

fn rewrite_keys(value: &Value, lookup: fn(&str) -> Option<&'static str>) -> Value {
    match value {
        Value::Object(map) => {
            let rewritten: Map<String, Value> = map
                .iter()
                .map(|(key, child)| {
                    let key = lookup(key).map_or_else(|| key.clone(), str::to_owned);
                    (key, rewrite_keys(child, lookup))
                })
                .collect();
            Value::Object(rewritten)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| rewrite_keys(v, lookup)).collect()),
        other => other.clone(),
    }
}
