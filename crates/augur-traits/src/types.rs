//! Common types used throughout the augur pipeline.
//!
//! This module defines the price records that flow out of the data source,
//! the ordered [`Series`] they are collected into, the time granularities a
//! series can be resampled to, and the lagged [`FeatureRow`]s the models are
//! trained on.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AugurError;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier such as `"GOOG"`.
pub type Symbol = String;

/// Time bucket size a series is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Raw feed resolution; resampling passes the series through unchanged.
    Minute,
    /// One record per calendar day.
    #[default]
    Daily,
    /// One record per ISO week.
    Weekly,
    /// One record per calendar month.
    Monthly,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Self; 4] = [Self::Minute, Self::Daily, Self::Weekly, Self::Monthly];

    /// Lowercase identifier used on the command line and in JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Whether this granularity aggregates into calendar buckets.
    ///
    /// Only calendar granularities are accepted in a forecast request.
    #[must_use]
    pub const fn is_calendar(&self) -> bool {
        !matches!(self, Self::Minute)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Minute => "Minute",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        };
        f.write_str(label)
    }
}

impl FromStr for Granularity {
    type Err = AugurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minute" | "min" | "1m" => Ok(Self::Minute),
            "daily" | "day" | "d" | "1d" => Ok(Self::Daily),
            "weekly" | "week" | "w" | "1wk" => Ok(Self::Weekly),
            "monthly" | "month" | "m" | "1mo" => Ok(Self::Monthly),
            other => Err(AugurError::InvalidParameter(format!(
                "unknown granularity '{other}' (expected daily, weekly or monthly)"
            ))),
        }
    }
}

/// A single timestamped price observation.
///
/// `close` is always present; the other price fields are optional because
/// the source feed is only required to carry `Date` and `Close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Observation time.
    pub timestamp: NaiveDateTime,
    /// Opening price.
    pub open: Option<f64>,
    /// Highest price.
    pub high: Option<f64>,
    /// Lowest price.
    pub low: Option<f64>,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: Option<f64>,
}

impl PriceRecord {
    /// Create a record carrying only a closing price.
    #[must_use]
    pub const fn from_close(timestamp: NaiveDateTime, close: f64) -> Self {
        Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }

    /// Calendar date of the observation.
    #[must_use]
    pub fn date(&self) -> Date {
        self.timestamp.date()
    }
}

/// An ordered sequence of price records for one ticker at one granularity.
///
/// Records are kept in ascending timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    symbol: Symbol,
    granularity: Granularity,
    records: Vec<PriceRecord>,
}

impl Series {
    /// Creates a series from records, sorting them by timestamp.
    ///
    /// The sort is stable, so records sharing a timestamp keep their
    /// relative order from the input.
    pub fn new(
        symbol: impl Into<Symbol>,
        granularity: Granularity,
        mut records: Vec<PriceRecord>,
    ) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self {
            symbol: symbol.into(),
            granularity,
            records,
        }
    }

    /// Ticker symbol the series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Granularity the records are expressed in.
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Records in ascending timestamp order.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    /// Consumes self and returns the records.
    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the series has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Closing prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.close).collect()
    }

    /// Calendar dates in series order.
    pub fn dates(&self) -> Vec<Date> {
        self.records.iter().map(PriceRecord::date).collect()
    }

    /// Earliest calendar date, if any.
    pub fn min_date(&self) -> Option<Date> {
        self.records.first().map(PriceRecord::date)
    }

    /// Latest calendar date, if any.
    pub fn max_date(&self) -> Option<Date> {
        self.records.last().map(PriceRecord::date)
    }
}

/// A training row derived from one series record.
///
/// `lags[j]` holds the close `(j + 1) * lag_gap` records before this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    /// Calendar date of the source record.
    pub date: Date,
    /// Whole days since the earliest date in the series.
    pub day_offset: i64,
    /// Closing price (the regression target).
    pub close: f64,
    /// Lagged closing prices, nearest lag first.
    pub lags: Vec<f64>,
}

impl FeatureRow {
    /// The regression inputs for this row: `[day_offset, lag_1, .., lag_k]`.
    pub fn features(&self) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.lags.len() + 1);
        features.push(self.day_offset as f64);
        features.extend_from_slice(&self.lags);
        features
    }

    /// Column label for position `index` of [`FeatureRow::features`].
    #[must_use]
    pub fn feature_name(index: usize) -> String {
        match index {
            0 => "day_offset".to_string(),
            j => format!("lag_{j}"),
        }
    }
}
