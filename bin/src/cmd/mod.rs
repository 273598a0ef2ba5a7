//! CLI subcommand modules.
//!
//! This module contains the implementations for all augur CLI subcommands.

pub(crate) mod forecast;
pub(crate) mod models;
pub(crate) mod tickers;

use augur_source::TickerRegistry;
use augur_traits::Result;
use std::path::Path;

/// Registry from `--tickers`, else from `AUGUR_TICKERS`, else `None` for the
/// built-in table.
pub(crate) fn custom_registry(path: Option<&Path>) -> Result<Option<TickerRegistry>> {
    match path {
        Some(path) => TickerRegistry::from_path(path).map(Some),
        None => TickerRegistry::from_env(),
    }
}
