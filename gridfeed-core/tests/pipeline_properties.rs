//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Window filtering — every sliced point satisfies `start <= t < end`
//! 2. Aggregation conservation — per-instant sums preserve the total
//! 3. Uniqueness — no instant appears twice after load-style aggregation
//! 4. Normalization — output instants are the local stamp in UTC minus the shift

use chrono::{Duration, TimeZone, Utc};
use chrono_tz::America::New_York;
use gridfeed_core::domain::{KeyedSample, Point};
use gridfeed_core::options::TemporalMode;
use gridfeed_core::series::{aggregate, normalize, slice};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0i64..50_000, -5000.0..5000.0f64), 0..200).prop_map(|raw| {
        raw.into_iter()
            .map(|(minute, value)| {
                Point::new(Utc.timestamp_opt(minute * 60, 0).unwrap(), value)
            })
            .collect()
    })
}

fn arb_window() -> impl Strategy<Value = (i64, i64)> {
    (0i64..50_000, 1i64..10_000).prop_map(|(start, len)| (start, start + len))
}

// ── 1. Window filtering ──────────────────────────────────────────────

proptest! {
    /// Every point surviving a range slice lies inside the half-open window,
    /// and output timestamps are non-decreasing.
    #[test]
    fn range_slice_respects_window(points in arb_points(), (start, end) in arb_window()) {
        let start_at = Utc.timestamp_opt(start * 60, 0).unwrap();
        let end_at = Utc.timestamp_opt(end * 60, 0).unwrap();
        let mode = TemporalMode::Range { start_at, end_at };
        let now = Utc.timestamp_opt(100_000 * 60, 0).unwrap();

        let sliced = slice::slice(points, &mode, now);
        for pair in sliced.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for p in &sliced {
            prop_assert!(p.timestamp >= start_at);
            prop_assert!(p.timestamp < end_at);
        }
    }

    /// Latest mode yields at most one distinct timestamp, at or before now.
    #[test]
    fn latest_slice_yields_one_instant(points in arb_points(), now_min in 0i64..50_000) {
        let now = Utc.timestamp_opt(now_min * 60, 0).unwrap();
        let sliced = slice::slice(points, &TemporalMode::Latest, now);
        if let Some(first) = sliced.first() {
            prop_assert!(first.timestamp <= now);
            for p in &sliced {
                prop_assert_eq!(p.timestamp, first.timestamp);
            }
        }
    }

    /// Forecast mode never returns a point before now.
    #[test]
    fn forecast_slice_is_at_or_after_now(points in arb_points(), now_min in 0i64..50_000) {
        let now = Utc.timestamp_opt(now_min * 60, 0).unwrap();
        let sliced = slice::slice(points, &TemporalMode::Forecast, now);
        for p in &sliced {
            prop_assert!(p.timestamp >= now);
        }
    }
}

// ── 2 & 3. Aggregation conservation and uniqueness ───────────────────

proptest! {
    /// Summing by instant conserves the grand total and deduplicates instants.
    #[test]
    fn sum_by_instant_conserves_total(points in arb_points()) {
        let input_total: f64 = points.iter().map(|p| p.value).sum();
        let summed = aggregate::sum_by_instant(points);

        let output_total: f64 = summed.iter().map(|p| p.value).sum();
        prop_assert!((input_total - output_total).abs() < 1e-6);

        for pair in summed.windows(2) {
            prop_assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }
}

// ── 4. Normalization ─────────────────────────────────────────────────

proptest! {
    /// A winter (EST, UTC-5) stamp normalizes to local+5h minus the shift,
    /// and the output is always UTC regardless of the source zone.
    #[test]
    fn normalization_applies_zone_and_shift(
        hour in 0u32..24,
        minute_slot in 0u32..12,
        shift_min in prop::sample::select(vec![0i64, 5]),
    ) {
        let minute = minute_slot * 5;
        let stamp = format!("01/15/2024 {hour:02}:{minute:02}:00");
        let samples = vec![KeyedSample::new(stamp, None, 1.0)];

        let points = normalize::normalize(samples, New_York, Duration::minutes(shift_min)).unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0).unwrap()
            + Duration::hours(5)
            - Duration::minutes(shift_min);
        prop_assert_eq!(points[0].timestamp, expected);
    }
}
