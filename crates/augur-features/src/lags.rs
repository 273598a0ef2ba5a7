//! Lagged closing-price features.

use augur_traits::{AugurError, Date, FeatureRow, Result, Series};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for lag feature construction.
///
/// Lag `j` of the record at position `i` is the close at position
/// `i - j * lag_gap`. Gaps are counted in series steps, not calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LagConfig {
    num_lags: usize,
    lag_gap: usize,
}

impl LagConfig {
    /// Create a lag configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::InvalidParameter`] if `lag_gap` is zero or
    /// `num_lags * lag_gap` does not fit in a `usize`.
    pub fn new(num_lags: usize, lag_gap: usize) -> Result<Self> {
        if lag_gap == 0 {
            return Err(AugurError::InvalidParameter(
                "lag gap must be at least 1".to_string(),
            ));
        }
        if num_lags.checked_mul(lag_gap).is_none() {
            return Err(AugurError::InvalidParameter(format!(
                "{num_lags} lags spaced {lag_gap} apart reach past any series"
            )));
        }
        Ok(Self { num_lags, lag_gap })
    }

    /// Number of lag columns.
    #[must_use]
    pub const fn num_lags(&self) -> usize {
        self.num_lags
    }

    /// Steps between consecutive lags.
    #[must_use]
    pub const fn lag_gap(&self) -> usize {
        self.lag_gap
    }

    /// Records consumed before the first complete row (`num_lags * lag_gap`).
    ///
    /// Saturates, so a deserialized config that skipped [`LagConfig::new`]
    /// yields no rows instead of overflowing.
    #[must_use]
    pub const fn warmup(&self) -> usize {
        self.num_lags.saturating_mul(self.lag_gap)
    }
}

impl Default for LagConfig {
    fn default() -> Self {
        Self {
            num_lags: 0,
            lag_gap: 1,
        }
    }
}

/// Whole calendar days from `origin` to `date`.
#[must_use]
pub fn day_offset(date: Date, origin: Date) -> i64 {
    (date - origin).num_days()
}

/// Build one feature row per record that has a complete set of lags.
///
/// Rows missing any lag are dropped entirely, so the output has
/// `len - num_lags * lag_gap` rows (or none when the series is too short).
/// `day_offset` is measured from the earliest date of the whole series, not
/// from the first emitted row.
#[must_use]
pub fn build_lag_features(series: &Series, config: &LagConfig) -> Vec<FeatureRow> {
    let Some(origin) = series.min_date() else {
        return Vec::new();
    };

    let closes = series.closes();
    let warmup = config.warmup();

    let rows: Vec<FeatureRow> = series
        .records()
        .iter()
        .enumerate()
        .skip(warmup)
        .map(|(i, record)| FeatureRow {
            date: record.date(),
            day_offset: day_offset(record.date(), origin),
            close: record.close,
            lags: (1..=config.num_lags)
                .map(|j| closes[i - j * config.lag_gap])
                .collect(),
        })
        .collect();

    debug!(
        symbol = series.symbol(),
        records = series.len(),
        rows = rows.len(),
        dropped = series.len() - rows.len(),
        num_lags = config.num_lags,
        lag_gap = config.lag_gap,
        "built lag features"
    );
    rows
}
