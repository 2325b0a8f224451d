//! Canonical record — the externally visible unit of grid data.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// What a request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// System demand in MW.
    Load,
    /// Net interchange across external ties in MW.
    Trade,
    /// Locational marginal price at a node.
    Lmp,
}

/// Market/settlement regime a datum was published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "RT5M")]
    Rt5m,
    #[serde(rename = "RT15M")]
    Rt15m,
    #[serde(rename = "HAM")]
    HourAhead,
    #[serde(rename = "DAM")]
    DayAhead,
}

impl Market {
    pub fn code(&self) -> &'static str {
        match self {
            Market::Rt5m => "RT5M",
            Market::Rt15m => "RT15M",
            Market::HourAhead => "HAM",
            Market::DayAhead => "DAM",
        }
    }

    /// The sampling frequency a market natively settles at.
    pub fn native_frequency(&self) -> Frequency {
        match self {
            Market::Rt5m => Frequency::FiveMin,
            Market::Rt15m => Frequency::FifteenMin,
            Market::HourAhead | Market::DayAhead => Frequency::Hourly,
        }
    }
}

/// Sampling interval of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "5m")]
    FiveMin,
    #[serde(rename = "15m")]
    FifteenMin,
    #[serde(rename = "1hr")]
    Hourly,
}

impl Frequency {
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::FiveMin => "5m",
            Frequency::FifteenMin => "15m",
            Frequency::Hourly => "1hr",
        }
    }

    /// Length of one interval at this frequency.
    pub fn interval(&self) -> Duration {
        match self {
            Frequency::FiveMin => Duration::minutes(5),
            Frequency::FifteenMin => Duration::minutes(15),
            Frequency::Hourly => Duration::hours(1),
        }
    }
}

/// One canonical output record.
///
/// Constructed once by the serializer per normalized point and immutable
/// thereafter. `timestamp` is always tz-aware UTC and marks the *start* of
/// the interval it summarizes, regardless of the source's native convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub ba_name: String,
    pub timestamp: DateTime<Utc>,
    pub freq: Frequency,
    pub market: Market,
    #[serde(flatten)]
    pub payload: Payload,
}

/// Data-kind-specific fields, serialized flat with the exact downstream
/// field names (`load_MW`, `net_exp_MW`, `node_id`, `lmp_type`, `lmp`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Load {
        #[serde(rename = "load_MW")]
        load_mw: f64,
    },
    Trade {
        #[serde(rename = "net_exp_MW")]
        net_exp_mw: f64,
    },
    Price {
        node_id: String,
        lmp_type: String,
        lmp: f64,
    },
}
