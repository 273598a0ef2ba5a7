//! End-to-end pipeline tests against an in-memory feed.

use approx::assert_abs_diff_eq;
use augur_forecast::{ForecastRequest, MAX_HORIZON, Pipeline};
use augur_models::ModelKind;
use augur_source::{Fetch, Location, TickerRegistry};
use augur_traits::{AugurError, Date, Granularity, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct MemoryFetcher {
    body: String,
    calls: AtomicUsize,
}

impl MemoryFetcher {
    fn new(body: String) -> Self {
        Self {
            body,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for &MemoryFetcher {
    async fn fetch_text(&self, _location: &Location) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.body.clone())
    }
}

fn registry() -> TickerRegistry {
    TickerRegistry::from_entries([(
        "TEST".to_string(),
        "https://feeds.invalid/test.csv".to_string(),
    )])
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

/// Minute bars on consecutive days; the last bar of day `i` closes at
/// `100 + 2 * i`.
fn linear_feed(days: u64) -> String {
    let start = date(2024, 1, 1);
    let mut csv = String::from("Date,Open,High,Low,Close,Volume\n");
    for i in 0..days {
        let day = start + chrono::Days::new(i);
        let close = 100.0 + 2.0 * i as f64;
        csv.push_str(&format!("{day} 09:30:00,1,1,1,{},10\n", close - 50.0));
        csv.push_str(&format!("{day} 15:59:00,1,1,1,{close},10\n"));
    }
    csv
}

fn noisy_feed(days: u64) -> String {
    let start = date(2023, 1, 2);
    let mut csv = String::from("Date,Close\n");
    for i in 0..days {
        let day = start + chrono::Days::new(i);
        let close = 200.0 + (i as f64) * 0.3 + (i as f64 * 0.9).sin() * 4.0;
        csv.push_str(&format!("{day} 16:00:00,{close}\n"));
    }
    csv
}

#[tokio::test]
async fn test_linear_reproduces_generating_line() {
    let fetcher = MemoryFetcher::new(linear_feed(20));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let request = ForecastRequest::new("test").with_horizon(3);
    let report = pipeline.run(&request).await.unwrap();

    assert_eq!(report.forecast.ticker, "TEST");
    assert_eq!(report.forecast.history.len(), 20);
    assert_eq!(report.forecast.history[0].close, 100.0);
    assert_eq!(
        report.description,
        "Linear Regression: close = 100.0000 + 2.0000 * day_offset"
    );

    let horizon = &report.forecast.horizon;
    assert_eq!(horizon.len(), 3);
    for (step, point) in horizon.iter().enumerate() {
        let offset = 20.0 + step as f64;
        assert_abs_diff_eq!(point.predicted_close, 100.0 + 2.0 * offset, epsilon = 1e-6);
    }
    assert_eq!(horizon[0].date, date(2024, 1, 21));
    assert_abs_diff_eq!(report.fit.r_squared, 1.0, epsilon = 1e-9);
}

#[tokio::test]
async fn test_projected_dates_follow_max_date() {
    // History ends on 2024-01-10
    let fetcher = MemoryFetcher::new(linear_feed(10));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let report = pipeline
        .run(&ForecastRequest::new("TEST").with_horizon(3))
        .await
        .unwrap();
    let dates: Vec<Date> = report.forecast.horizon.iter().map(|p| p.date).collect();
    assert_eq!(
        dates,
        vec![date(2024, 1, 11), date(2024, 1, 12), date(2024, 1, 13)]
    );
}

#[tokio::test]
async fn test_weekly_projection_still_steps_daily() {
    let fetcher = MemoryFetcher::new(noisy_feed(70));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let request = ForecastRequest::new("TEST")
        .with_granularity(Granularity::Weekly)
        .with_horizon(2);
    let report = pipeline.run(&request).await.unwrap();

    let history = &report.forecast.history;
    assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    let last = history.last().unwrap().date;
    assert_eq!(report.forecast.horizon[0].date, last + chrono::Days::new(1));
    assert_eq!(report.forecast.horizon[1].date, last + chrono::Days::new(2));
}

#[tokio::test]
async fn test_unknown_ticker_never_fetches() {
    let fetcher = MemoryFetcher::new(linear_feed(5));
    let pipeline = Pipeline::new(TickerRegistry::builtin(), &fetcher);

    let result = pipeline.run(&ForecastRequest::new("ZZZZ")).await;
    assert!(matches!(result, Err(AugurError::UnknownTicker(_))));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_invalid_request_never_fetches() {
    let fetcher = MemoryFetcher::new(linear_feed(5));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let request = ForecastRequest::new("TEST").with_horizon(0);
    let result = pipeline.run(&request).await;
    assert!(matches!(result, Err(AugurError::InvalidParameter(_))));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_extreme_parameters_rejected_without_fetch() {
    let fetcher = MemoryFetcher::new(linear_feed(5));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    for request in [
        ForecastRequest::new("TEST").with_lags(2, usize::MAX / 2 + 1),
        ForecastRequest::new("TEST").with_horizon(1 << 40),
        ForecastRequest::new("TEST").with_horizon(MAX_HORIZON + 1),
    ] {
        let result = pipeline.run(&request).await;
        assert!(
            matches!(result, Err(AugurError::InvalidParameter(_))),
            "{request:?}"
        );
    }
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_too_many_lags_fails_cleanly() {
    let fetcher = MemoryFetcher::new(linear_feed(4));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let request = ForecastRequest::new("TEST").with_lags(5, 1);
    let result = pipeline.run(&request).await;
    assert!(matches!(
        result,
        Err(AugurError::EmptySeries(_) | AugurError::InsufficientData { .. })
    ));
}

#[tokio::test]
async fn test_lags_leave_too_few_rows() {
    // 8 records, 3 lags: 5 rows remain, 5 required
    let fetcher = MemoryFetcher::new(linear_feed(8));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    assert!(
        pipeline
            .run(&ForecastRequest::new("TEST").with_lags(3, 1))
            .await
            .is_ok()
    );

    let result = pipeline
        .run(&ForecastRequest::new("TEST").with_lags(3, 2))
        .await;
    // 8 - 6 = 2 rows, 5 required
    assert!(matches!(
        result,
        Err(AugurError::InsufficientData {
            required: 5,
            available: 2
        })
    ));
}

#[tokio::test]
async fn test_empty_feed_is_empty_series() {
    let fetcher = MemoryFetcher::new("Date,Close\n".to_string());
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let result = pipeline.run(&ForecastRequest::new("TEST")).await;
    assert!(matches!(result, Err(AugurError::EmptySeries(_))));
}

#[tokio::test]
async fn test_random_forest_is_repeatable() {
    let fetcher = MemoryFetcher::new(noisy_feed(60));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let request = ForecastRequest::new("TEST")
        .with_model(ModelKind::RandomForest)
        .with_lags(2, 1)
        .with_horizon(4);
    let first = pipeline.run(&request).await.unwrap();
    let second = pipeline.run(&request).await.unwrap();

    for (a, b) in first.forecast.horizon.iter().zip(&second.forecast.horizon) {
        assert_abs_diff_eq!(a.predicted_close, b.predicted_close, epsilon = 1e-9);
    }
    assert_eq!(
        first.description,
        "Random Forest Regression (100 trees): no closed-form equation available"
    );
}

#[tokio::test]
async fn test_every_model_with_lags() {
    let fetcher = MemoryFetcher::new(noisy_feed(90));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    for model in ModelKind::ALL {
        for granularity in [Granularity::Daily, Granularity::Weekly] {
            let request = ForecastRequest::new("TEST")
                .with_model(model)
                .with_granularity(granularity)
                .with_lags(2, 2)
                .with_horizon(5);
            let report = pipeline.run(&request).await.unwrap();
            assert_eq!(report.forecast.horizon.len(), 5, "{model} {granularity}");
            assert!(
                report
                    .forecast
                    .horizon
                    .iter()
                    .all(|p| p.predicted_close.is_finite())
            );
        }
    }
}

#[tokio::test]
async fn test_run_for_display_formats_errors() {
    let fetcher = MemoryFetcher::new(String::new());
    let pipeline = Pipeline::new(TickerRegistry::builtin(), &fetcher);

    let message = pipeline
        .run_for_display(&ForecastRequest::new("ZZZZ"))
        .await
        .unwrap_err();
    assert!(message.contains("ZZZZ"));
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let fetcher = MemoryFetcher::new(linear_feed(6));
    let registry = registry();
    let pipeline = Pipeline::new(&registry, &fetcher);

    let report = pipeline
        .run(&ForecastRequest::new("TEST").with_horizon(2))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["forecast"]["ticker"], "TEST");
    assert_eq!(json["forecast"]["model"], "linear");
    assert_eq!(json["forecast"]["granularity"], "daily");
    assert_eq!(json["forecast"]["horizon"].as_array().unwrap().len(), 2);
    assert_eq!(json["forecast"]["horizon"][0]["date"], "2024-01-07");
    assert_eq!(json["fit"]["n_train"], 6);
}
