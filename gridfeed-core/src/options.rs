//! Request options and their resolution rules.
//!
//! A [`Request`] is the raw option bag a caller hands to an adapter. The
//! resolver validates the temporal mode (latest XOR forecast XOR explicit
//! window), fills the per-data-kind market/frequency defaults, and checks the
//! result against the adapter's declared capabilities. No network access
//! happens here — a bad request fails before the first fetch.

use crate::domain::{DataKind, Frequency, Market};
use crate::error::GridError;
use chrono::{DateTime, Utc};

/// Raw request options, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub latest: bool,
    pub forecast: bool,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub market: Option<Market>,
    pub frequency: Option<Frequency>,
    /// Node filter for price feeds; ignored by load and trade.
    pub node_ids: Vec<String>,
}

impl Request {
    /// Explicit half-open window `[start_at, end_at)`.
    pub fn range(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            start_at: Some(start_at),
            end_at: Some(end_at),
            ..Self::default()
        }
    }

    /// The single most recent known point.
    pub fn latest() -> Self {
        Self {
            latest: true,
            ..Self::default()
        }
    }

    /// Points at or after "now".
    pub fn forecast() -> Self {
        Self {
            forecast: true,
            ..Self::default()
        }
    }

    pub fn with_market(mut self, market: Market) -> Self {
        self.market = Some(market);
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_nodes(mut self, node_ids: Vec<String>) -> Self {
        self.node_ids = node_ids;
        self
    }
}

/// Which of the three temporal modes a request is in. Exactly one is active
/// after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemporalMode {
    Latest,
    Forecast,
    Range {
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
    },
}

/// Validated request options.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub data_kind: DataKind,
    pub mode: TemporalMode,
    pub market: Market,
    pub frequency: Frequency,
    pub node_ids: Vec<String>,
}

/// Market/frequency combinations a balancing authority declares for one data
/// kind. Pure constant data, declared once per adapter.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub supported: &'static [(Market, Frequency)],
}

impl Capabilities {
    pub fn supports(&self, market: Market, frequency: Frequency) -> bool {
        self.supported
            .iter()
            .any(|&(m, f)| m == market && f == frequency)
    }
}

/// Validate a raw request and fill in defaults.
pub fn resolve(
    kind: DataKind,
    req: &Request,
    caps: &Capabilities,
) -> Result<ResolvedOptions, GridError> {
    let range_given = req.start_at.is_some() || req.end_at.is_some();

    let mode = match (req.latest, req.forecast) {
        (true, true) => {
            return Err(GridError::Configuration(
                "latest and forecast are mutually exclusive".into(),
            ))
        }
        (true, false) | (false, true) if range_given => {
            return Err(GridError::Configuration(
                "latest/forecast and an explicit window are mutually exclusive".into(),
            ))
        }
        (true, false) => TemporalMode::Latest,
        (false, true) => TemporalMode::Forecast,
        (false, false) => {
            let (Some(start_at), Some(end_at)) = (req.start_at, req.end_at) else {
                return Err(GridError::Configuration(
                    "an explicit window needs both start_at and end_at \
                     (or set latest/forecast)"
                        .into(),
                ));
            };
            if start_at >= end_at {
                return Err(GridError::Configuration(format!(
                    "empty window: start_at {start_at} is not before end_at {end_at}"
                )));
            }
            TemporalMode::Range { start_at, end_at }
        }
    };

    let (default_market, default_frequency) = defaults(kind, mode == TemporalMode::Forecast);
    let market = req.market.unwrap_or(default_market);
    // An explicit market without an explicit frequency implies the market's
    // native frequency, not the data-kind default.
    let frequency = req.frequency.unwrap_or(if req.market.is_some() {
        market.native_frequency()
    } else {
        default_frequency
    });

    if !caps.supports(market, frequency) {
        return Err(GridError::Configuration(format!(
            "{} @ {} is not supported for {kind:?} data",
            market.code(),
            frequency.code(),
        )));
    }

    Ok(ResolvedOptions {
        data_kind: kind,
        mode,
        market,
        frequency,
        node_ids: req.node_ids.clone(),
    })
}

/// Per-data-kind market/frequency defaults: trade and non-forecast load are
/// 5-minute real-time; forecast load is hourly day-ahead; prices default to
/// 5-minute real-time.
fn defaults(kind: DataKind, forecast: bool) -> (Market, Frequency) {
    match (kind, forecast) {
        (DataKind::Load, true) => (Market::DayAhead, Frequency::Hourly),
        (DataKind::Load, false) | (DataKind::Trade, _) | (DataKind::Lmp, _) => {
            (Market::Rt5m, Frequency::FiveMin)
        }
    }
}
