//! Intermediate series shapes between parser and serializer.

use chrono::{DateTime, Utc};

/// One parsed reading from a raw payload, still in source-native time.
///
/// Produced by a per-feed parser, consumed immediately by the temporal
/// normalizer; never persisted. `key` is the grouping column for multi-series
/// feeds (zone name, interface name, price node) and `None` for single-series
/// feeds.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedSample {
    pub stamp: String,
    /// Zone abbreviation published alongside the stamp (e.g. EST vs EDT),
    /// when the feed carries one. Disambiguates the DST fall-back hour.
    pub zone: Option<String>,
    pub key: Option<String>,
    pub value: f64,
}

impl KeyedSample {
    pub fn new(stamp: impl Into<String>, key: Option<String>, value: f64) -> Self {
        Self {
            stamp: stamp.into(),
            zone: None,
            key,
            value,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

/// A normalized observation.
///
/// `timestamp` is tz-aware UTC and marks interval-start. After aggregation
/// the same instant never appears twice for the same `series_key`.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub series_key: Option<String>,
}

impl Point {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value,
            series_key: None,
        }
    }

    pub fn keyed(timestamp: DateTime<Utc>, value: f64, key: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            series_key: Some(key.into()),
        }
    }
}
