//! Error types for the augur pipeline.
//!
//! Every stage of the pipeline reports failures through [`AugurError`]. The
//! variants mirror the points at which a forecast request can stop: an unknown
//! ticker, an unreachable or malformed data source, an empty series, too few
//! feature rows, or a bad request parameter.

use thiserror::Error;

/// The main error type for augur operations.
#[derive(Debug, Error)]
pub enum AugurError {
    /// The requested ticker is not present in the registry.
    #[error("Unknown ticker: {0}")]
    UnknownTicker(String),

    /// The remote fetch failed or returned content that could not be parsed.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Resampling or lag construction left no usable rows.
    #[error("Empty series: {0}")]
    EmptySeries(String),

    /// Fewer feature rows than the selected model needs.
    #[error("Insufficient data: needed at least {required} rows, got {available}")]
    InsufficientData {
        /// Minimum number of rows required.
        required: usize,
        /// Number of rows actually available.
        available: usize,
    },

    /// A request parameter is out of range or unrecognised.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical failure while fitting or evaluating a model.
    #[error("Model error: {0}")]
    Model(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Invalid configuration (for example a malformed registry file).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AugurError {
    /// Render the error as a message suitable for showing to an end user.
    ///
    /// The pipeline boundary uses this to turn any failure into displayable
    /// text instead of a process fault.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownTicker(symbol) => {
                format!("Error: ticker '{symbol}' is not available.")
            }
            Self::DataUnavailable(cause) => {
                format!("Error: could not load price data ({cause}).")
            }
            Self::EmptySeries(detail) => {
                format!("Error: no data found for the selected ticker ({detail}).")
            }
            Self::InsufficientData {
                required,
                available,
            } => format!(
                "Error: not enough data to fit the model ({available} usable rows, {required} required). \
                 Try fewer lags, a smaller lag gap or a finer granularity."
            ),
            Self::InvalidParameter(detail) => format!("Error: {detail}"),
            Self::Model(detail) => format!("Error: model fitting failed ({detail})."),
            Self::Polars(err) => format!("Error: could not parse price data ({err})."),
            Self::Config(detail) => format!("Error: bad configuration ({detail})."),
        }
    }
}

/// A specialized Result type for augur operations.
///
/// This is a convenience type that uses [`AugurError`] as the error type.
pub type Result<T> = std::result::Result<T, AugurError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AugurError::UnknownTicker("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Unknown ticker: ZZZZ");

        let err = AugurError::InsufficientData {
            required: 7,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: needed at least 7 rows, got 3"
        );
    }

    #[test]
    fn test_user_message_mentions_cause() {
        let err = AugurError::DataUnavailable("HTTP 404 Not Found".to_string());
        let msg = err.user_message();
        assert!(msg.starts_with("Error:"));
        assert!(msg.contains("HTTP 404"));

        let err = AugurError::UnknownTicker("ZZZZ".to_string());
        assert!(err.user_message().contains("ZZZZ"));
    }

    #[test]
    fn test_empty_and_unavailable_are_distinct() {
        let empty = AugurError::EmptySeries("no rows".to_string()).user_message();
        let down = AugurError::DataUnavailable("timeout".to_string()).user_message();
        assert_ne!(empty, down);
        assert!(empty.contains("no data found"));
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(AugurError::Model("singular".to_string()));
        assert!(err_result.is_err());
    }
}
