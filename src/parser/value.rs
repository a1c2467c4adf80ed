use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::metadata::Value;

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}(?:[T ]\S.*)?$").unwrap());

/// Interprets the right-hand side of `key = value`. `None` means malformed.
///
/// The value is read as a TOML value. Strings, arrays of strings and
/// datetimes are accepted. A date-shaped token TOML rejects (`2021-02-30`,
/// `2022-1-5`) is still read as a date when chrono can, else kept as text.
pub(super) fn parse_value(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match format!("v = {raw}").parse::<toml::Table>() {
        Ok(mut table) => from_toml(table.remove("v")?, raw),
        Err(e) => {
            debug!("`{raw}` is not a TOML value: {e}");
            parse_bare(raw)
        }
    }
}

fn from_toml(value: toml::Value, raw: &str) -> Option<Value> {
    match value {
        toml::Value::String(s) => Some(Value::String(s)),
        toml::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                toml::Value::String(s) => Some(s),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::List),
        toml::Value::Datetime(dt) => dt
            .date
            .and_then(|d| {
                NaiveDate::from_ymd_opt(d.year.into(), d.month.into(), d.day.into())
            })
            .map(Value::Date)
            .or_else(|| parse_bare(raw)),
        // integers, floats, booleans and tables are not post metadata
        _ => None,
    }
}

fn parse_bare(raw: &str) -> Option<Value> {
    let token = raw.split_once('#').map_or(raw, |(v, _)| v).trim();
    if !DATE_SHAPE.is_match(token) {
        return None;
    }

    match parse_date(token) {
        Some(date) => Some(Value::Date(date)),
        None => {
            debug!("`{token}` looks like a date but does not parse. keeping it as a string");
            Some(Value::String(token.to_string()))
        }
    }
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(token).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
                .map(|dt| dt.date())
        })
}
