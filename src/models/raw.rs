//! Raw sheet rows and the coercions that turn them into typed values.
//!
//! The sheet endpoint returns loosely-typed JSON: a date may arrive as a
//! `YYYY-MM-DD` string, a full ISO timestamp or epoch milliseconds; a price
//! as a number or a numeric string; a flag as a bool, `"yes"` or `1`. Every
//! parser here is total: it returns a value of the target type or the
//! caller's fallback, never an error.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The wire format of every date that crosses a boundary.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A commission row as stored in the sheet. Every field is optional and untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCommissionRow {
    /// Row id assigned by the sheet.
    pub id: Option<Value>,
    /// Client nickname.
    pub client_name: Option<Value>,
    /// Name on the deposit.
    pub depositor_name: Option<Value>,
    /// Workflow status token.
    pub status: Option<Value>,
    /// Date the material was received.
    pub material_received_date: Option<Value>,
    /// Date of the review slot.
    pub review_date: Option<Value>,
    /// Stored elapsed days.
    pub diff_days: Option<Value>,
    /// Stored tier token.
    pub price_tier: Option<Value>,
    /// Stored base price.
    pub base_price: Option<Value>,
    /// Stored surcharge.
    pub extra_price: Option<Value>,
    /// Stored final price.
    pub final_price: Option<Value>,
    /// Stored week start (ignored; always recomputed).
    pub week_start: Option<Value>,
    /// Slot position inside the week.
    pub slot_index: Option<Value>,
    /// Free-form note.
    pub memo: Option<Value>,
    /// Creation timestamp as written by the sheet.
    pub created_at: Option<Value>,
}

/// A notice row as stored in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawNoticeRow {
    /// Row id assigned by the sheet.
    pub id: Option<Value>,
    /// Notice title.
    pub title: Option<Value>,
    /// Notice body (rich text).
    pub body: Option<Value>,
    /// Pinned flag.
    pub is_pinned: Option<Value>,
    /// Visibility flag.
    pub is_active: Option<Value>,
    /// Creation timestamp.
    pub created_at: Option<Value>,
    /// Last update timestamp.
    pub updated_at: Option<Value>,
}

/// Parses a `YYYY-MM-DD` key. Longer ISO strings are cut to their first ten characters.
///
/// # Example
///
/// ```
/// use commission_booking::models::parse_date_key;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2025, 12, 10);
/// assert_eq!(parse_date_key("2025-12-10"), expected);
/// assert_eq!(parse_date_key("2025-12-10T00:00:00Z"), expected);
/// assert_eq!(parse_date_key("next tuesday"), None);
/// ```
pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let key = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Coerces a sheet value into a calendar date.
///
/// Strings go through [`parse_date_key`]; numbers are read as epoch
/// milliseconds (UTC). Anything else, including blanks, is absent.
pub fn normalize_date(raw: Option<&Value>) -> Option<NaiveDate> {
    match raw? {
        Value::String(s) => parse_date_key(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

/// Coerces a sheet value into non-blank text. Numbers are rendered as text.
pub fn parse_text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerces a sheet value into a boolean.
///
/// | input | result |
/// |---|---|
/// | JSON bool | itself |
/// | `true`, `1`, `y`, `yes` (trimmed, any case) | `true` |
/// | `false`, `0`, `n`, `no` (trimmed, any case) | `false` |
/// | JSON number | `true` unless zero |
/// | anything else | `default` |
///
/// # Example
///
/// ```
/// use commission_booking::models::parse_bool;
/// use serde_json::json;
///
/// assert!(parse_bool(Some(&json!(" Yes ")), false));
/// assert!(!parse_bool(Some(&json!(0)), true));
/// assert!(parse_bool(Some(&json!("maybe")), true));
/// assert!(!parse_bool(None, false));
/// ```
pub fn parse_bool(raw: Option<&Value>, default: bool) -> bool {
    match raw {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "y" | "yes" => true,
            "false" | "0" | "n" | "no" => false,
            _ => default,
        },
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => default,
    }
}

/// Coerces a sheet value into a whole number, if it holds one.
///
/// Numeric strings are parsed exactly as decimals before rounding, so
/// `"50000.00"` and `50000` agree. Fractions round half to even.
pub fn parse_integer(raw: Option<&Value>) -> Option<i64> {
    let decimal = match raw? {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Decimal::from(i)),
            None => n.as_f64().and_then(Decimal::from_f64),
        },
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
        }
        _ => None,
    }?;

    decimal
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
}

/// Coerces a sheet value into an amount, falling back to `default`.
///
/// # Example
///
/// ```
/// use commission_booking::models::parse_amount;
/// use serde_json::json;
///
/// assert_eq!(parse_amount(Some(&json!("70000")), 50000), 70000);
/// assert_eq!(parse_amount(Some(&json!("")), 50000), 50000);
/// assert_eq!(parse_amount(None, 50000), 50000);
/// ```
pub fn parse_amount(raw: Option<&Value>, default: i64) -> i64 {
    parse_integer(raw).unwrap_or(default)
}
