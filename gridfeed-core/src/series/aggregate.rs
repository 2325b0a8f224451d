//! The reduction shapes observed across balancing-authority feeds.
//!
//! Sources report finer-grained sub-series than the canonical output needs.
//! Three reductions cover the feeds served so far: a plain per-instant sum
//! (load zones into a system total), a pivot-then-sum over a fixed interface
//! allow-list (scheduled tie flows into one net interchange), and a
//! first-per-(instant, node) dedup for price series.

use crate::domain::Point;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Load-style reduction: sum every value reported for the same UTC instant.
/// Output is one unkeyed point per instant, ascending.
pub fn sum_by_instant(points: Vec<Point>) -> Vec<Point> {
    let mut totals: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
    for point in points {
        *totals.entry(point.timestamp).or_insert(0.0) += point.value;
    }
    totals
        .into_iter()
        .map(|(timestamp, value)| Point::new(timestamp, value))
        .collect()
}

/// Trade-style reduction over a fixed set of external interfaces.
///
/// Duplicate (instant, interface) rows keep their first occurrence. Keys
/// outside `allowed` are discarded. An instant is emitted only when *every*
/// allowed interface reported — a partial instant is dropped, not
/// interpolated. The output value is `sign * sum`; `sign = -1.0` converts a
/// raw import-positive convention into export-positive.
pub fn net_over_interfaces(points: Vec<Point>, allowed: &[&str], sign: f64) -> Vec<Point> {
    let mut pivoted: BTreeMap<DateTime<Utc>, BTreeMap<usize, f64>> = BTreeMap::new();
    for point in &points {
        let Some(key) = point.series_key.as_deref() else {
            continue;
        };
        let Some(column) = allowed.iter().position(|a| *a == key) else {
            continue;
        };
        pivoted
            .entry(point.timestamp)
            .or_default()
            .entry(column)
            .or_insert(point.value);
    }

    pivoted
        .into_iter()
        .filter(|(_, columns)| columns.len() == allowed.len())
        .map(|(timestamp, columns)| {
            Point::new(timestamp, sign * columns.values().sum::<f64>())
        })
        .collect()
}

/// Price-style reduction: one point per (instant, node), first occurrence
/// wins. A non-empty `nodes` filter restricts output to the named nodes.
pub fn first_by_instant_and_key(points: Vec<Point>, nodes: &[String]) -> Vec<Point> {
    let mut table: BTreeMap<(DateTime<Utc>, String), f64> = BTreeMap::new();
    for point in points {
        let Some(key) = point.series_key else {
            continue;
        };
        if !nodes.is_empty() && !nodes.iter().any(|n| *n == key) {
            continue;
        }
        table.entry((point.timestamp, key)).or_insert(point.value);
    }
    table
        .into_iter()
        .map(|((timestamp, key), value)| Point::keyed(timestamp, value, key))
        .collect()
}
