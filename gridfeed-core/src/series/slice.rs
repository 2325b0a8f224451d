//! Slicing a normalized series to the requested temporal window.

use crate::domain::Point;
use crate::options::TemporalMode;
use chrono::{DateTime, Utc};

/// Filter normalized points to the requested window, ascending by timestamp
/// (then series key, for multi-node output).
///
/// Range keeps `start_at <= t < end_at`. Latest keeps only the most recent
/// instant at or before `now` — every series key reported at that instant,
/// but exactly one distinct timestamp. Forecast keeps `t >= now`. An empty
/// result is a valid outcome, never an error: a future window not yet
/// published, or a quiet weekend, simply has no data.
pub fn slice(mut points: Vec<Point>, mode: &TemporalMode, now: DateTime<Utc>) -> Vec<Point> {
    points.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.series_key.cmp(&b.series_key))
    });

    match mode {
        TemporalMode::Range { start_at, end_at } => points
            .into_iter()
            .filter(|p| p.timestamp >= *start_at && p.timestamp < *end_at)
            .collect(),
        TemporalMode::Forecast => points.into_iter().filter(|p| p.timestamp >= now).collect(),
        TemporalMode::Latest => {
            let last = points
                .iter()
                .filter(|p| p.timestamp <= now)
                .map(|p| p.timestamp)
                .max();
            match last {
                Some(ts) => points.into_iter().filter(|p| p.timestamp == ts).collect(),
                None => Vec::new(),
            }
        }
    }
}
