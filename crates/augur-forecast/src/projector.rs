//! Calendar dates for forecast steps.

use augur_traits::{AugurError, Date, Result};
use chrono::Days;

/// The `horizon` calendar days following `max_date`.
///
/// Steps are always one day apart, whatever the granularity of the history
/// the forecast was fit on.
///
/// # Errors
///
/// Returns [`AugurError::InvalidParameter`] if a projected date falls outside
/// the supported calendar range.
pub fn project_dates(max_date: Date, horizon: usize) -> Result<Vec<Date>> {
    (1..=horizon as u64)
        .map(|step| {
            max_date.checked_add_days(Days::new(step)).ok_or_else(|| {
                AugurError::InvalidParameter(format!(
                    "projecting {horizon} days past {max_date} leaves the calendar range"
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_three_days_after() {
        assert_eq!(
            project_dates(date(2024, 1, 10), 3).unwrap(),
            vec![date(2024, 1, 11), date(2024, 1, 12), date(2024, 1, 13)]
        );
    }

    #[test]
    fn test_crosses_month_and_leap_day() {
        assert_eq!(
            project_dates(date(2024, 2, 28), 3).unwrap(),
            vec![date(2024, 2, 29), date(2024, 3, 1), date(2024, 3, 2)]
        );
    }

    #[test]
    fn test_strictly_daily_steps() {
        let dates = project_dates(date(2023, 12, 25), 30).unwrap();
        assert_eq!(dates.len(), 30);
        assert!(dates.windows(2).all(|w| (w[1] - w[0]).num_days() == 1));
    }

    #[test]
    fn test_zero_horizon() {
        assert!(project_dates(date(2024, 1, 1), 0).unwrap().is_empty());
    }

    #[test]
    fn test_calendar_overflow() {
        assert!(project_dates(Date::MAX, 1).is_err());
    }
}
