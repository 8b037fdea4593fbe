//! Event bucketing
//!
//! First stage of the aggregation pipeline: raw events in, sparse bucketed
//! counts out. Pure function of its arguments; storage and transport stay
//! on the caller's side of the boundary.

use super::error::SeriesResult;
use super::granularity::Granularity;
use super::period::Period;
use super::types::SeriesPoint;
use crate::store::Event;
use chrono::FixedOffset;
use std::collections::BTreeMap;

/// Group events into per-period counts
///
/// Keeps only events whose label equals `label` exactly (no normalization,
/// no case folding), keys each survivor by its calendar period under
/// `granularity` and the `calendar` offset, and sums counts per key. The
/// result is strictly ascending by key with no duplicates and contains only
/// periods that saw at least one event; empty input produces an empty
/// series.
///
/// Fails closed on the first event whose timestamp cannot be keyed
/// (`TimestampOutOfRange`): a bad stored timestamp fails the whole call
/// instead of silently skewing the counts.
pub fn bucketize(
    events: &[Event],
    granularity: Granularity,
    label: &str,
    calendar: FixedOffset,
) -> SeriesResult<Vec<SeriesPoint>> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for event in events.iter().filter(|e| e.label == label) {
        let key = Period::from_timestamp(event.timestamp, granularity, calendar)?.key();
        *counts.entry(key).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(key, count)| SeriesPoint { key, count })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn event(label: &str, timestamp: i64) -> Event {
        Event::with_timestamp(label, timestamp)
    }

    #[test]
    fn test_bucketize_groups_same_day() {
        let events = vec![
            event("press", 1704448800000), // 2024-01-05 10:00 UTC
            event("press", 1704477600000), // 2024-01-05 18:00 UTC
            event("press", 1704618000000), // 2024-01-07 09:00 UTC
        ];

        let series = bucketize(&events, Granularity::Day, "press", utc()).unwrap();

        assert_eq!(
            series,
            vec![
                SeriesPoint::new("2024-01-05", 2),
                SeriesPoint::new("2024-01-07", 1),
            ]
        );
    }

    #[test]
    fn test_bucketize_label_filter_is_exact() {
        let events = vec![
            event("press", 1704448800000),
            event("Press", 1704448800000),
            event("press ", 1704448800000),
            event("other", 1704448800000),
        ];

        let series = bucketize(&events, Granularity::Day, "press", utc()).unwrap();
        assert_eq!(series, vec![SeriesPoint::new("2024-01-05", 1)]);
    }

    #[test]
    fn test_bucketize_sorts_ascending_regardless_of_input_order() {
        let events = vec![
            event("press", 1704618000000), // 2024-01-07
            event("press", 1704448800000), // 2024-01-05
            event("press", 1704477600000), // 2024-01-05
        ];

        let series = bucketize(&events, Granularity::Day, "press", utc()).unwrap();
        let keys: Vec<&str> = series.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-05", "2024-01-07"]);
    }

    #[test]
    fn test_bucketize_month_and_year_granularities() {
        let events = vec![
            event("press", 1700049600000), // 2023-11-15 12:00 UTC
            event("press", 1707566400000), // 2024-02-10 12:00 UTC
        ];

        let months = bucketize(&events, Granularity::Month, "press", utc()).unwrap();
        assert_eq!(
            months,
            vec![
                SeriesPoint::new("2023-11", 1),
                SeriesPoint::new("2024-02", 1),
            ]
        );

        let years = bucketize(&events, Granularity::Year, "press", utc()).unwrap();
        assert_eq!(
            years,
            vec![SeriesPoint::new("2023", 1), SeriesPoint::new("2024", 1)]
        );
    }

    #[test]
    fn test_bucketize_empty_input() {
        let series = bucketize(&[], Granularity::Day, "press", utc()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_bucketize_no_matching_label() {
        let events = vec![event("other", 1704448800000)];
        let series = bucketize(&events, Granularity::Day, "press", utc()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_bucketize_fails_closed_on_bad_timestamp() {
        let events = vec![
            event("press", 1704448800000),
            event("press", i64::MAX), // unrepresentable instant
        ];

        let result = bucketize(&events, Granularity::Day, "press", utc());
        assert!(matches!(
            result,
            Err(super::super::SeriesError::TimestampOutOfRange(_))
        ));
    }

    #[test]
    fn test_bucketize_calendar_offset_changes_bucket() {
        // 2024-01-05 23:30 UTC is already Jan 6 at +03:00
        let events = vec![event("press", 1704497400000)];

        let in_utc = bucketize(&events, Granularity::Day, "press", utc()).unwrap();
        assert_eq!(in_utc[0].key, "2024-01-05");

        let east = FixedOffset::east_opt(3 * 3600).unwrap();
        let shifted = bucketize(&events, Granularity::Day, "press", east).unwrap();
        assert_eq!(shifted[0].key, "2024-01-06");
    }
}
