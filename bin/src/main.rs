//! augur CLI binary.
//!
//! Provides a command-line interface for the augur forecasting pipeline.

mod cmd;

use anyhow::Result;
use augur_forecast::{DEFAULT_HORIZON, ForecastRequest};
use augur_models::ModelKind;
use augur_source::TickerRegistry;
use augur_traits::{AugurError, Granularity};
use clap::{ArgAction, Parser, Subcommand};
use cmd::forecast::OutputFormat;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "augur")]
#[command(about = "Stock price forecasting from lagged closing prices", long_about = None)]
#[command(version)]
struct Cli {
    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file mapping tickers to feed locations (overrides AUGUR_TICKERS)
    #[arg(long, global = true, value_name = "FILE")]
    tickers: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast future closing prices for a ticker
    Forecast {
        /// Ticker symbol
        ticker: String,

        /// Resampling granularity (daily, weekly, monthly)
        #[arg(short, long, default_value = "daily")]
        granularity: Granularity,

        /// Number of future days to project (1 to 60)
        #[arg(short = 'H', long, default_value_t = DEFAULT_HORIZON)]
        horizon: usize,

        /// Model (linear, polynomial, ridge, random_forest)
        #[arg(short, long, default_value = "linear")]
        model: ModelKind,

        /// Number of lagged closes used as features
        #[arg(long, default_value_t = 0)]
        lags: usize,

        /// Records between consecutive lags
        #[arg(long, default_value_t = 1)]
        lag_gap: usize,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Number of historical closes to print in text output
        #[arg(long, default_value_t = 10)]
        history: usize,
    },

    /// List registered tickers
    Tickers,

    /// List available models
    Models,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<AugurError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let custom = cmd::custom_registry(cli.tickers.as_deref())?;
    let registry = custom.as_ref().unwrap_or_else(|| TickerRegistry::builtin());
    debug!(
        tickers = registry.len(),
        custom = custom.is_some(),
        "ticker registry loaded"
    );

    match cli.command {
        Commands::Forecast {
            ticker,
            granularity,
            horizon,
            model,
            lags,
            lag_gap,
            format,
            history,
        } => {
            let request = ForecastRequest::new(ticker)
                .with_granularity(granularity)
                .with_horizon(horizon)
                .with_model(model)
                .with_lags(lags, lag_gap);
            cmd::forecast::run_forecast(registry, &request, format, history).await?;
        }
        Commands::Tickers => {
            cmd::tickers::list_tickers(registry);
        }
        Commands::Models => {
            cmd::models::list_models();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_forecast_args() {
        let cli = Cli::parse_from([
            "augur", "forecast", "tsla", "-g", "weekly", "-H", "3", "-m", "rf", "--lags", "2",
        ]);
        match cli.command {
            Commands::Forecast {
                ticker,
                granularity,
                horizon,
                model,
                lags,
                lag_gap,
                format,
                ..
            } => {
                assert_eq!(ticker, "tsla");
                assert_eq!(granularity, Granularity::Weekly);
                assert_eq!(horizon, 3);
                assert_eq!(model, ModelKind::RandomForest);
                assert_eq!(lags, 2);
                assert_eq!(lag_gap, 1);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected forecast command"),
        }
    }

    #[test]
    fn test_rejects_unknown_model() {
        let result = Cli::try_parse_from(["augur", "forecast", "GOOG", "-m", "lasso"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["augur", "tickers", "-vv", "--tickers", "feeds.json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.tickers, Some(PathBuf::from("feeds.json")));
    }
}
