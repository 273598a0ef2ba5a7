//! Forecast request parameters.

use augur_features::LagConfig;
use augur_models::ModelKind;
use augur_traits::{AugurError, Granularity, Result};
use serde::{Deserialize, Serialize};

/// Default number of projected steps.
pub const DEFAULT_HORIZON: usize = 7;

/// Largest accepted number of projected steps.
pub const MAX_HORIZON: usize = 60;

/// One forecast request, as received from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Ticker symbol, matched case-insensitively against the registry
    pub ticker: String,

    /// Resampling granularity (daily, weekly or monthly)
    pub granularity: Granularity,

    /// Number of future steps to project
    pub horizon: usize,

    /// Model class to fit
    pub model: ModelKind,

    /// Number of lagged closes used as features
    pub num_lags: usize,

    /// Records between consecutive lags
    pub lag_gap: usize,
}

impl ForecastRequest {
    /// A request for `ticker` with default settings: daily, seven steps,
    /// linear regression, no lags.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            granularity: Granularity::Daily,
            horizon: DEFAULT_HORIZON,
            model: ModelKind::Linear,
            num_lags: 0,
            lag_gap: 1,
        }
    }

    /// Set the granularity.
    #[must_use]
    pub const fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the horizon.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the model class.
    #[must_use]
    pub const fn with_model(mut self, model: ModelKind) -> Self {
        self.model = model;
        self
    }

    /// Set the lag count and spacing.
    #[must_use]
    pub const fn with_lags(mut self, num_lags: usize, lag_gap: usize) -> Self {
        self.num_lags = num_lags;
        self.lag_gap = lag_gap;
        self
    }

    /// Check the parameters and derive the lag configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::InvalidParameter`] if the ticker is blank, the
    /// horizon is outside `1..=MAX_HORIZON`, the lag settings are unusable,
    /// or the granularity is not a calendar bucket.
    pub fn validate(&self) -> Result<LagConfig> {
        if self.ticker.trim().is_empty() {
            return Err(AugurError::InvalidParameter(
                "ticker must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_HORIZON).contains(&self.horizon) {
            return Err(AugurError::InvalidParameter(format!(
                "horizon must be between 1 and {MAX_HORIZON}, got {}",
                self.horizon
            )));
        }
        if !self.granularity.is_calendar() {
            return Err(AugurError::InvalidParameter(format!(
                "granularity must be Daily, Weekly or Monthly, got {}",
                self.granularity
            )));
        }
        LagConfig::new(self.num_lags, self.lag_gap)
    }
}
