//! Forecast command implementation.

use anyhow::Result;
use augur_forecast::{ForecastReport, ForecastRequest, Pipeline};
use augur_source::{HttpFetcher, TickerRegistry};
use clap::ValueEnum;

/// How the forecast report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    Text,
    /// The serialized report
    Json,
}

/// Run one forecast request and print the report.
pub(crate) async fn run_forecast(
    registry: &TickerRegistry,
    request: &ForecastRequest,
    format: OutputFormat,
    history: usize,
) -> Result<()> {
    let pipeline = Pipeline::new(registry, HttpFetcher::new());
    let report = pipeline.run(request).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report, history),
    }

    Ok(())
}

fn print_report(report: &ForecastReport, history: usize) {
    let forecast = &report.forecast;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                        Forecast                              ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Ticker:      {}", forecast.ticker);
    println!("Granularity: {}", forecast.granularity);
    println!("Model:       {}", forecast.model);
    println!();
    println!("{}", report.description);
    println!();

    println!("Fit ({} training rows):", report.fit.n_train);
    println!("{}", "-".repeat(40));
    println!("  R²:   {:>12.4}", report.fit.r_squared);
    println!("  MAE:  {:>12.4}", report.fit.mae);
    println!("  RMSE: {:>12.4}", report.fit.rmse);
    println!();

    if history > 0 {
        let total = forecast.history.len();
        let skip = total.saturating_sub(history);
        println!("History (last {} of {total}):", total - skip);
        println!("{}", "-".repeat(40));
        for point in &forecast.history[skip..] {
            println!("  {}  {:>12.4}", point.date, point.close);
        }
        println!();
    }

    println!("Projection:");
    println!("{}", "-".repeat(40));
    for point in &forecast.horizon {
        println!("  {}  {:>12.4}", point.date, point.predicted_close);
    }
    println!();
}
