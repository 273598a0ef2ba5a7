//! CSV payload normalization.
//!
//! Turns the raw CSV text of a price feed into a [`Series`]: numeric columns
//! are forward-filled, the date column is parsed leniently and rows that
//! cannot be placed in time are dropped.

use augur_traits::{AugurError, Granularity, PriceRecord, Result, Series};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::io::Cursor;
use tracing::{debug, warn};

const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Parse a timestamp in any of the accepted feed formats.
///
/// Date-only values are placed at midnight. Returns `None` when no format
/// matches.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
}

/// Parse a CSV price feed into a raw (minute granularity) series.
///
/// `Date` and `Close` columns are required; `Open`, `High`, `Low` and
/// `Volume` are picked up when present. Column names match
/// case-insensitively.
///
/// # Errors
///
/// Returns [`AugurError::DataUnavailable`] if the payload is not valid CSV
/// or lacks a required column.
pub fn parse_price_csv(symbol: &str, text: &str) -> Result<Series> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.as_bytes().to_vec()))
        .finish()
        .map_err(|e| AugurError::DataUnavailable(format!("malformed CSV payload: {e}")))?;

    let date_name = find_column(&df, "date")
        .ok_or_else(|| AugurError::DataUnavailable("payload has no Date column".to_string()))?;
    let close_name = find_column(&df, "close")
        .ok_or_else(|| AugurError::DataUnavailable("payload has no Close column".to_string()))?;

    let dates = filled_dates(&df, &date_name)?;
    let closes = filled_numeric(&df, &close_name)?;
    let opens = optional_numeric(&df, "open")?;
    let highs = optional_numeric(&df, "high")?;
    let lows = optional_numeric(&df, "low")?;
    let volumes = optional_numeric(&df, "volume")?;

    let mut records = Vec::with_capacity(df.height());
    let mut bad_dates = 0usize;
    let mut missing_close = 0usize;

    for (i, raw_date) in dates.iter().enumerate() {
        let Some(timestamp) = raw_date.as_deref().and_then(parse_timestamp) else {
            bad_dates += 1;
            continue;
        };
        let Some(close) = closes[i] else {
            missing_close += 1;
            continue;
        };

        records.push(PriceRecord {
            timestamp,
            open: pick(&opens, i),
            high: pick(&highs, i),
            low: pick(&lows, i),
            close,
            volume: pick(&volumes, i),
        });
    }

    if bad_dates > 0 {
        warn!(symbol, rows = bad_dates, "dropped rows with unparseable dates");
    }
    if missing_close > 0 {
        debug!(symbol, rows = missing_close, "dropped leading rows without a close");
    }
    debug!(symbol, records = records.len(), "normalized price feed");

    Ok(Series::new(symbol, Granularity::Minute, records))
}

fn find_column(df: &DataFrame, wanted: &str) -> Option<String> {
    df.get_column_names()
        .iter()
        .find(|name| name.trim().eq_ignore_ascii_case(wanted))
        .map(|name| name.to_string())
}

/// Date strings with nulls forward-filled.
fn filled_dates(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?
        .fill_null(FillNullStrategy::Forward(None))?;

    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Numeric column cast to `f64` with nulls forward-filled.
///
/// Values that do not parse as numbers become nulls before the fill.
fn filled_numeric(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?
        .fill_null(FillNullStrategy::Forward(None))?;

    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect())
}

fn optional_numeric(df: &DataFrame, wanted: &str) -> Result<Option<Vec<Option<f64>>>> {
    find_column(df, wanted)
        .map(|name| filled_numeric(df, &name))
        .transpose()
}

fn pick(column: &Option<Vec<Option<f64>>>, i: usize) -> Option<f64> {
    column.as_ref().and_then(|values| values[i])
}
