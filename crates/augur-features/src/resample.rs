//! Last-value resampling into calendar buckets.

use augur_traits::{Date, Granularity, PriceRecord, Series};
use chrono::{Datelike, Days};
use tracing::debug;

/// First calendar date of the bucket containing `date`.
///
/// Daily buckets are the date itself, weekly buckets start on the Monday of
/// the ISO week and monthly buckets on the first of the month. Returns `None`
/// for [`Granularity::Minute`], which has no calendar bucket.
#[must_use]
pub fn bucket_start(date: Date, granularity: Granularity) -> Option<Date> {
    match granularity {
        Granularity::Minute => None,
        Granularity::Daily => Some(date),
        Granularity::Weekly => {
            let back = u64::from(date.weekday().num_days_from_monday());
            date.checked_sub_days(Days::new(back))
        }
        Granularity::Monthly => date.with_day(1),
    }
}

/// Resample a series to `granularity`, keeping the last record per bucket.
///
/// Buckets without observations produce no record. The representative of a
/// bucket is the record with the greatest timestamp; it keeps its own
/// timestamp and prices. [`Granularity::Minute`] returns the input unchanged.
#[must_use]
pub fn resample(series: &Series, granularity: Granularity) -> Series {
    if granularity == Granularity::Minute {
        return series.clone();
    }

    let mut buckets: Vec<(Date, PriceRecord)> = Vec::new();
    for record in series.records() {
        let Some(key) = bucket_start(record.date(), granularity) else {
            continue;
        };
        match buckets.last_mut() {
            Some((last_key, last)) if *last_key == key => *last = record.clone(),
            _ => buckets.push((key, record.clone())),
        }
    }

    debug!(
        symbol = series.symbol(),
        %granularity,
        input = series.len(),
        buckets = buckets.len(),
        "resampled series"
    );

    Series::new(
        series.symbol(),
        granularity,
        buckets.into_iter().map(|(_, record)| record).collect(),
    )
}
