//! Temporal normalization: source-native local timestamps → UTC interval-start.

use crate::domain::{KeyedSample, Point};
use crate::error::GridError;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Timestamp layouts seen across balancing-authority CSV feeds.
const STAMP_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse a native local timestamp string in the source's zone and convert it
/// to UTC. The DST fall-back hour is ambiguous locally; the earlier mapping
/// is taken. A nonexistent local time (spring-forward gap) is a parse error.
pub fn to_utc(stamp: &str, tz: Tz) -> Result<DateTime<Utc>, GridError> {
    to_utc_hinted(stamp, tz, None)
}

/// Like [`to_utc`], with a zone-abbreviation hint (e.g. `EST`/`EDT`) from the
/// payload. During the fall-back hour each local stamp occurs twice; the hint
/// says which reading this row is. Without a hint, or when the hint matches
/// neither mapping, the earlier one is taken.
pub fn to_utc_hinted(
    stamp: &str,
    tz: Tz,
    zone_hint: Option<&str>,
) -> Result<DateTime<Utc>, GridError> {
    let trimmed = stamp.trim();
    let naive = STAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| GridError::parse(format!("unrecognized timestamp '{trimmed}'"), stamp))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, latest) => {
            let chosen = match zone_hint.map(str::trim) {
                Some(hint) if latest.format("%Z").to_string() == hint => latest,
                _ => earliest,
            };
            Ok(chosen.with_timezone(&Utc))
        }
        LocalResult::None => Err(GridError::parse(
            format!("nonexistent local time '{trimmed}' in {tz}"),
            stamp,
        )),
    }
}

/// Normalize parsed samples: local stamp → UTC, then subtract the adapter's
/// declared alignment shift so every instant marks the start of its interval.
///
/// `shift` is the sampling interval for sources that stamp an interval by its
/// end, and zero for interval-start sources. The adapter declares it per
/// frequency; an undeclared frequency never reaches this function.
pub fn normalize(
    samples: Vec<KeyedSample>,
    tz: Tz,
    shift: Duration,
) -> Result<Vec<Point>, GridError> {
    samples
        .into_iter()
        .map(|sample| {
            let timestamp = to_utc_hinted(&sample.stamp, tz, sample.zone.as_deref())? - shift;
            Ok(Point {
                timestamp,
                value: sample.value,
                series_key: sample.key,
            })
        })
        .collect()
}
