//! Ticker to series resolution.

use crate::{
    client::{Fetch, Location},
    normalize::parse_price_csv,
    registry::TickerRegistry,
};
use augur_traits::{AugurError, Result, Series};
use tracing::info;

/// Loads raw price series for registered tickers.
#[derive(Debug, Clone)]
pub struct SeriesSource<'r, F> {
    registry: &'r TickerRegistry,
    fetcher: F,
}

impl<'r, F: Fetch> SeriesSource<'r, F> {
    /// Create a source over a registry and a fetcher.
    pub const fn new(registry: &'r TickerRegistry, fetcher: F) -> Self {
        Self { registry, fetcher }
    }

    /// The registry tickers are resolved against.
    pub const fn registry(&self) -> &'r TickerRegistry {
        self.registry
    }

    /// Fetch and normalize the raw series for `ticker`.
    ///
    /// The registry lookup happens before any I/O, so an unknown ticker never
    /// touches the network.
    ///
    /// # Errors
    ///
    /// - [`AugurError::UnknownTicker`] if the ticker is not registered
    /// - [`AugurError::DataUnavailable`] if the fetch fails or the payload is
    ///   malformed
    /// - [`AugurError::EmptySeries`] if the payload holds no usable rows
    pub async fn load(&self, ticker: &str) -> Result<Series> {
        let location = Location::parse(self.registry.resolve(ticker)?);
        let symbol = ticker.trim().to_uppercase();

        let text = self.fetcher.fetch_text(&location).await?;
        let series = parse_price_csv(&symbol, &text)?;

        if series.is_empty() {
            return Err(AugurError::EmptySeries(format!(
                "the feed for {symbol} contains no usable rows"
            )));
        }

        info!(
            symbol = %symbol,
            records = series.len(),
            first = ?series.min_date(),
            last = ?series.max_date(),
            "loaded raw series"
        );
        Ok(series)
    }
}
