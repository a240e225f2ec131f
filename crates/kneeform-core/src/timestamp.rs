//! Decoding of stored submission dates.
//!
//! The form store serializes dates as `{ "_seconds": i64, "_nanoseconds": i64 }`.

use jiff::Timestamp;
use serde_json::Value;

/// Decode a `{ _seconds, _nanoseconds }` object. Anything else is `None`.
pub fn from_value(raw: &Value) -> Option<Timestamp> {
    let seconds = raw.get("_seconds")?.as_i64()?;
    let nanos = raw
        .get("_nanoseconds")
        .and_then(Value::as_i64)
        .unwrap_or(0);
    // Millisecond precision is all the store keeps meaningful.
    let millis = seconds.checked_mul(1000)?.checked_add(nanos / 1_000_000)?;
    Timestamp::from_millisecond(millis).ok()
}
