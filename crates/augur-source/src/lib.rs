//! Price series loading for augur.
//!
//! This crate resolves a ticker symbol to the location of its raw price feed,
//! fetches the CSV payload and normalizes it into a [`Series`] at the finest
//! granularity the feed offers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use augur_source::{HttpFetcher, SeriesSource, TickerRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = SeriesSource::new(TickerRegistry::builtin(), HttpFetcher::new());
//!     let series = source.load("GOOG").await?;
//!     println!("{} raw records", series.len());
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `AUGUR_TICKERS` to the path of a JSON object mapping tickers to
//! locations to replace the built-in registry. A `.env` file is honoured:
//!
//! ```bash
//! AUGUR_TICKERS=./tickers.json
//! ```
//!
//! [`Series`]: augur_traits::Series

mod client;
mod normalize;
mod registry;
mod source;

pub use client::{Fetch, HttpFetcher, Location, raw_download_url};
pub use normalize::{parse_price_csv, parse_timestamp};
pub use registry::{TICKERS_ENV, TickerRegistry};
pub use source::SeriesSource;
