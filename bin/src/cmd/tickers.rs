//! Ticker listing command implementation.

use augur_source::TickerRegistry;

/// List every registered ticker with its feed location.
pub(crate) fn list_tickers(registry: &TickerRegistry) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Registered Tickers                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for (symbol, location) in registry.iter() {
        println!("  {symbol:8} {location}");
    }
    println!("\n{} ticker(s)\n", registry.len());
}
