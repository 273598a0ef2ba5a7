//! Ticker registry mapping symbols to raw price feed locations.

use augur_traits::{AugurError, Result};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::sync::LazyLock;

/// Environment variable naming a JSON registry file.
pub const TICKERS_ENV: &str = "AUGUR_TICKERS";

/// Raw feed locations shipped with the application.
const BUILTIN_TICKERS: [(&str, &str); 5] = [
    (
        "APPL",
        "https://edubuas-my.sharepoint.com/:x:/g/personal/davarynejad_m_buas_nl/EUjD8nLdpt1FmcNq1kQckBAB9gfHTn2Y_hl1zGOo5ecrYQ?e=AEmTL8",
    ),
    (
        "AMZN",
        "https://edubuas-my.sharepoint.com/:x:/g/personal/davarynejad_m_buas_nl/ERqUB631cFlEilFPtvFw5MkBlq_bVvc4xa27svDLWGlU3A?e=nHbTKw",
    ),
    (
        "FANG",
        "https://edubuas-my.sharepoint.com/:x:/g/personal/davarynejad_m_buas_nl/EejmVAFQLv5PqJGuFXcvgVYBGswiq_oQJ4LhzslJbLAoAA?e=SN9BLa",
    ),
    (
        "GOOG",
        "https://edubuas-my.sharepoint.com/:x:/g/personal/davarynejad_m_buas_nl/ET6y-MR3SidHjGGmm8DQMn4BtpSO-GnAokJ8GI4LsghZDw?e=st6IyB",
    ),
    (
        "TSLA",
        "https://edubuas-my.sharepoint.com/:x:/g/personal/davarynejad_m_buas_nl/Ecv4R01Cn75Koj7y8UFjxHMBazIVliolR9rioUwyT03vcw?e=uq2TSF",
    ),
];

static BUILTIN: LazyLock<TickerRegistry> = LazyLock::new(|| {
    TickerRegistry::from_entries(
        BUILTIN_TICKERS
            .iter()
            .map(|(symbol, location)| ((*symbol).to_string(), (*location).to_string())),
    )
});

/// Read-only lookup from ticker symbol to feed location.
///
/// Symbols are stored upper-cased and looked up case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerRegistry {
    entries: BTreeMap<String, String>,
}

impl TickerRegistry {
    /// The built-in registry, initialized once per process.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Build a registry from `(symbol, location)` pairs.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(symbol, location)| (normalize_symbol(&symbol), location))
                .collect(),
        }
    }

    /// Parse a registry from a JSON object of `"SYMBOL": "location"` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::Config`] if the JSON is malformed, is not an
    /// object of strings, or is empty.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)
            .map_err(|e| AugurError::Config(format!("invalid ticker registry: {e}")))?;

        if entries.is_empty() {
            return Err(AugurError::Config(
                "ticker registry must contain at least one ticker".to_string(),
            ));
        }

        Ok(Self::from_entries(entries))
    }

    /// Load a registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::Config`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AugurError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Load the registry named by the `AUGUR_TICKERS` environment variable.
    ///
    /// This will also load from a `.env` file if present. Returns `Ok(None)`
    /// when the variable is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but the file is unusable.
    pub fn from_env() -> Result<Option<Self>> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        match env::var(TICKERS_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()).map(Some),
            _ => Ok(None),
        }
    }

    /// Resolve a ticker to its feed location.
    ///
    /// # Errors
    ///
    /// Returns [`AugurError::UnknownTicker`] if the ticker is not registered.
    pub fn resolve(&self, ticker: &str) -> Result<&str> {
        let symbol = normalize_symbol(ticker);
        self.entries
            .get(&symbol)
            .map(String::as_str)
            .ok_or(AugurError::UnknownTicker(symbol))
    }

    /// Whether the ticker is registered.
    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.contains_key(&normalize_symbol(ticker))
    }

    /// Registered symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterate over `(symbol, location)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(symbol, location)| (symbol.as_str(), location.as_str()))
    }

    /// Returns the number of registered tickers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = TickerRegistry::builtin();
        assert_eq!(registry.len(), 5);
        assert_eq!(
            registry.symbols(),
            vec!["AMZN", "APPL", "FANG", "GOOG", "TSLA"]
        );
        assert!(registry.resolve("GOOG").unwrap().starts_with("https://"));
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(
            TickerRegistry::builtin(),
            TickerRegistry::builtin()
        ));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = TickerRegistry::builtin();
        assert_eq!(registry.resolve("tsla").unwrap(), registry.resolve("TSLA").unwrap());
        assert!(registry.contains(" goog "));
    }

    #[test]
    fn test_unknown_ticker() {
        let result = TickerRegistry::builtin().resolve("ZZZZ");
        assert!(matches!(result, Err(AugurError::UnknownTicker(ref s)) if s == "ZZZZ"));
    }

    #[test]
    fn test_from_json_str() {
        let registry =
            TickerRegistry::from_json_str(r#"{"msft": "data/msft.csv", "NVDA": "https://x/y.csv"}"#)
                .unwrap();
        assert_eq!(registry.symbols(), vec!["MSFT", "NVDA"]);
        assert_eq!(registry.resolve("MSFT").unwrap(), "data/msft.csv");
    }

    #[test]
    fn test_from_json_str_rejects_bad_input() {
        assert!(matches!(
            TickerRegistry::from_json_str("[1, 2]"),
            Err(AugurError::Config(_))
        ));
        assert!(matches!(
            TickerRegistry::from_json_str("{}"),
            Err(AugurError::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_path() {
        let result = TickerRegistry::from_path("/nonexistent/augur/tickers.json");
        assert!(matches!(result, Err(AugurError::Config(_))));
    }
}
