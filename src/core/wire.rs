//! Lenient decoding helpers for collaborator payloads
//!
//! The REST collaborator is not strict about JSON types: amounts come back as
//! `7000`, `7000.0` or `"7000.00"`, ids as numbers or strings, and optional
//! text as `null`. These helpers accept all of those shapes for the fields
//! that carry them.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, de::Error};
use serde_json::Value;

fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .and_then(Decimal::from_f64)
                .and_then(|d| round_whole(d).to_i64())
        }),
        Value::String(s) => Decimal::from_str(s.trim())
            .ok()
            .and_then(|d| round_whole(d).to_i64()),
        _ => None,
    }
}

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Round half away from zero to a whole number
pub(crate) fn round_whole(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_i64(&value).ok_or_else(|| D::Error::custom(format!("expected integer, got {}", value)))
}

pub(crate) fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        value => value_to_i64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected integer, got {}", value))),
    }
}

pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        value => value_to_f64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected number, got {}", value))),
    }
}

/// Present field: `null` or blank text means "clear" (`Some(None)`)
pub(crate) fn clearable_f64<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_f64(deserializer).map(Some)
}

pub(crate) fn clearable_i64<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_opt_i64(deserializer).map(Some)
}

/// `null` decodes as an empty string
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339, or the `YYYY-MM-DD HH:MM:SS` form some endpoints emit (read as UTC)
pub(crate) fn lenient_opt_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|_| D::Error::custom(format!("invalid timestamp '{}'", raw)))
}

/// Strip a `{ "data": ... }` wrapper when the collaborator adds one
pub(crate) fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") && !map.contains_key("id") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
