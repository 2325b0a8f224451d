//! NYISO — New York ISO.
//!
//! NYISO publishes one CSV per feed per calendar day at
//! `http://mis.nyiso.com/public/csv/<feed>/<YYYYMMDD><feed>.csv`, timestamped
//! in America/New_York local time. The five-minute feeds (`pal`,
//! `ExternalLimitsFlows`, `realtime`) stamp each interval by its end; the
//! hourly files (`isolf`, `damlbmp`) stamp interval starts.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use gridfeed_core::dates::DateIter;
use gridfeed_core::domain::{DataKind, Frequency, KeyedSample, Market, Point, Record};
use gridfeed_core::error::GridError;
use gridfeed_core::options::{resolve, Capabilities, Request, ResolvedOptions};
use gridfeed_core::series::serialize::Extras;
use gridfeed_core::series::{aggregate, normalize, serialize, slice};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::client::GridClient;
use crate::config::ClientConfig;
use crate::transport::FeedTransport;

const BASE_URL: &str = "http://mis.nyiso.com/public/csv";
const TZ: Tz = chrono_tz::America::New_York;

/// External ties whose scheduled flows make up NYISO's true net interchange.
/// Everything else in `ExternalLimitsFlows` is an internal interface.
const EXTERNAL_INTERFACES: [&str; 11] = [
    "SCH - HQ - NY",
    "SCH - HQ_CEDARS",
    "SCH - HQ_IMPORT_EXPORT", // Hydro-Québec
    "SCH - NE - NY",
    "SCH - NPX_1385",
    "SCH - NPX_CSC", // ISO-NE
    "SCH - OH - NY", // Ontario
    "SCH - PJ - NY",
    "SCH - PJM_HTP",
    "SCH - PJM_NEPTUNE",
    "SCH - PJM_VFT", // PJM
];

const LOAD_CAPS: Capabilities = Capabilities {
    supported: &[
        (Market::Rt5m, Frequency::FiveMin),
        (Market::DayAhead, Frequency::Hourly),
    ],
};
const TRADE_CAPS: Capabilities = Capabilities {
    supported: &[(Market::Rt5m, Frequency::FiveMin)],
};
const LMP_CAPS: Capabilities = Capabilities {
    supported: &[
        (Market::Rt5m, Frequency::FiveMin),
        (Market::DayAhead, Frequency::Hourly),
    ],
};

/// One `pal` (actual load) row: long format, one row per zone per stamp.
/// The `Time Zone` column (EST/EDT) disambiguates the DST fall-back hour.
#[derive(Debug, Deserialize)]
struct LoadRow {
    #[serde(rename = "Time Stamp")]
    stamp: String,
    #[serde(rename = "Time Zone")]
    time_zone: Option<String>,
    #[serde(rename = "Name")]
    zone: String,
    #[serde(rename = "Load")]
    load_mw: Option<f64>,
}

/// One `ExternalLimitsFlows` row.
#[derive(Debug, Deserialize)]
struct FlowRow {
    #[serde(rename = "Timestamp")]
    stamp: String,
    #[serde(rename = "Time Zone")]
    time_zone: Option<String>,
    #[serde(rename = "Interface Name")]
    interface: String,
    #[serde(rename = "Flow (MWH)")]
    flow_mw: Option<f64>,
}

/// One `damlbmp`/`realtime` zonal price row. Only the real-time files carry
/// the `Time Zone` column.
#[derive(Debug, Deserialize)]
struct LmpRow {
    #[serde(rename = "Time Stamp")]
    stamp: String,
    #[serde(rename = "Time Zone")]
    time_zone: Option<String>,
    #[serde(rename = "Name")]
    node: String,
    #[serde(rename = "LBMP ($/MWHr)")]
    lmp: Option<f64>,
}

/// NYISO adapter bundle.
pub struct NyisoClient {
    transport: Arc<dyn FeedTransport>,
    base_url: String,
}

impl NyisoClient {
    pub const NAME: &'static str = "NYISO";

    pub fn new(config: &ClientConfig, transport: Arc<dyn FeedTransport>) -> Self {
        Self {
            base_url: config.base_url_for(Self::NAME, BASE_URL),
            transport,
        }
    }

    fn feed_url(&self, date: NaiveDate, feed: &str) -> String {
        format!("{}/{}/{}{}.csv", self.base_url, feed, date.format("%Y%m%d"), feed)
    }

    /// How far a stamped instant must be moved back to mean interval-start.
    /// Declared per frequency; anything undeclared is rejected, not guessed.
    fn alignment_shift(frequency: Frequency) -> Result<Duration, GridError> {
        match frequency {
            // five-minute feeds stamp the interval end
            Frequency::FiveMin => Ok(Duration::minutes(5)),
            // hourly files stamp the interval start
            Frequency::Hourly => Ok(Duration::zero()),
            other => Err(GridError::Configuration(format!(
                "NYISO declares no interval alignment for {} data",
                other.code(),
            ))),
        }
    }

    /// The date-batched fetch loop: one CSV per local calendar date,
    /// sequential, aborting on the first failed fetch or parse.
    fn collect(
        &self,
        feed: &str,
        opts: &ResolvedOptions,
        parse: fn(&str) -> Result<Vec<KeyedSample>, GridError>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Point>, GridError> {
        let shift = Self::alignment_shift(opts.frequency)?;
        let mut samples = Vec::new();
        for date in DateIter::new(&opts.mode, TZ, now) {
            let url = self.feed_url(date, feed);
            debug!(%date, feed, "fetching NYISO date batch");
            let content = self.transport.fetch(&url)?;
            samples.extend(parse(&content)?);
        }
        normalize::normalize(samples, TZ, shift)
    }
}

impl GridClient for NyisoClient {
    fn ba_name(&self) -> &'static str {
        Self::NAME
    }

    fn capabilities(&self, kind: DataKind) -> Capabilities {
        match kind {
            DataKind::Load => LOAD_CAPS,
            DataKind::Trade => TRADE_CAPS,
            DataKind::Lmp => LMP_CAPS,
        }
    }

    fn get_load(&self, req: &Request) -> Result<Vec<Record>, GridError> {
        let opts = resolve(DataKind::Load, req, &LOAD_CAPS)?;
        let now = Utc::now();

        // The feed follows the resolved market, so the output tags and the
        // alignment shift always describe the file actually fetched: `pal` is
        // the real-time actuals, `isolf` the day-ahead forecast.
        let (feed, parser): (&str, fn(&str) -> Result<Vec<KeyedSample>, GridError>) =
            match opts.market {
                Market::Rt5m => ("pal", parse_load),
                Market::DayAhead => ("isolf", parse_load_forecast),
                other => {
                    return Err(GridError::Configuration(format!(
                        "NYISO serves no load feed for {}",
                        other.code(),
                    )))
                }
            };

        let points = self.collect(feed, &opts, parser, now)?;
        let summed = aggregate::sum_by_instant(points);
        let sliced = slice::slice(summed, &opts.mode, now);
        Ok(serialize::serialize(sliced, DataKind::Load, &extras(&opts)))
    }

    fn get_trade(&self, req: &Request) -> Result<Vec<Record>, GridError> {
        let opts = resolve(DataKind::Trade, req, &TRADE_CAPS)?;
        let now = Utc::now();

        let points = self.collect("ExternalLimitsFlows", &opts, parse_flows, now)?;
        // The feed reports import-positive flow; net export flips the sign.
        let netted = aggregate::net_over_interfaces(points, &EXTERNAL_INTERFACES, -1.0);
        let sliced = slice::slice(netted, &opts.mode, now);
        Ok(serialize::serialize(sliced, DataKind::Trade, &extras(&opts)))
    }

    fn get_lmp(&self, req: &Request) -> Result<Vec<Record>, GridError> {
        let opts = resolve(DataKind::Lmp, req, &LMP_CAPS)?;
        let now = Utc::now();

        let feed = match opts.market {
            Market::DayAhead => "damlbmp",
            Market::Rt5m => "realtime",
            other => {
                return Err(GridError::Configuration(format!(
                    "NYISO serves no price feed for {}",
                    other.code(),
                )))
            }
        };

        let points = self.collect(feed, &opts, parse_lmp, now)?;
        let deduped = aggregate::first_by_instant_and_key(points, &opts.node_ids);
        let sliced = slice::slice(deduped, &opts.mode, now);
        Ok(serialize::serialize(sliced, DataKind::Lmp, &extras(&opts)))
    }
}

fn extras(opts: &ResolvedOptions) -> Extras {
    Extras {
        ba_name: NyisoClient::NAME,
        freq: opts.frequency,
        market: opts.market,
        lmp_type: "energy",
    }
}

/// Find an expected column in the header row, rejecting the payload when it
/// is absent. Catches error pages served with HTTP 200 and silent
/// feed-format changes, including for zero-row payloads that would otherwise
/// deserialize vacuously.
fn require_column(
    content: &str,
    headers: &csv::StringRecord,
    name: &str,
) -> Result<usize, GridError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            GridError::parse(format!("expected column '{name}' not found"), content)
        })
}

fn parse_error(err: impl std::fmt::Display, content: &str) -> GridError {
    GridError::parse(err.to_string(), content)
}

/// Parse a `pal` payload: one sample per (stamp, zone); zone loads are summed
/// later by the load-style aggregation. Rows with no reading are skipped.
fn parse_load(content: &str) -> Result<Vec<KeyedSample>, GridError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| parse_error(e, content))?.clone();
    require_column(content, &headers, "Time Stamp")?;
    require_column(content, &headers, "Load")?;

    let mut samples = Vec::new();
    for row in rdr.deserialize::<LoadRow>() {
        let row = row.map_err(|e| parse_error(e, content))?;
        if let Some(load_mw) = row.load_mw {
            samples.push(KeyedSample {
                stamp: row.stamp,
                zone: row.time_zone,
                key: Some(row.zone),
                value: load_mw,
            });
        }
    }
    Ok(samples)
}

/// Parse an `isolf` payload. The forecast file is wide — one column per zone
/// plus a `NYISO` system-total column, which is skipped so zones are not
/// counted twice. Empty cells (horizon hours not yet published) are skipped.
fn parse_load_forecast(content: &str) -> Result<Vec<KeyedSample>, GridError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| parse_error(e, content))?.clone();
    let stamp_col = require_column(content, &headers, "Time Stamp")?;

    let mut samples = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| parse_error(e, content))?;
        let stamp = record
            .get(stamp_col)
            .ok_or_else(|| parse_error("row shorter than header", content))?;

        for (col, cell) in record.iter().enumerate() {
            if col == stamp_col || cell.trim().is_empty() {
                continue;
            }
            let zone = headers
                .get(col)
                .ok_or_else(|| parse_error("row wider than header", content))?
                .trim();
            if zone == "NYISO" {
                continue;
            }
            let value: f64 = cell
                .trim()
                .parse()
                .map_err(|e| parse_error(format!("bad forecast value '{cell}': {e}"), content))?;
            samples.push(KeyedSample::new(stamp, Some(zone.to_string()), value));
        }
    }
    Ok(samples)
}

/// Parse an `ExternalLimitsFlows` payload: one sample per (stamp, interface).
/// Dedup, allow-listing, and completeness are the aggregator's job.
fn parse_flows(content: &str) -> Result<Vec<KeyedSample>, GridError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| parse_error(e, content))?.clone();
    require_column(content, &headers, "Timestamp")?;
    require_column(content, &headers, "Interface Name")?;

    let mut samples = Vec::new();
    for row in rdr.deserialize::<FlowRow>() {
        let row = row.map_err(|e| parse_error(e, content))?;
        if let Some(flow_mw) = row.flow_mw {
            samples.push(KeyedSample {
                stamp: row.stamp,
                zone: row.time_zone,
                key: Some(row.interface),
                value: flow_mw,
            });
        }
    }
    Ok(samples)
}

/// Parse a `damlbmp`/`realtime` zonal price payload: one sample per
/// (stamp, zone).
fn parse_lmp(content: &str) -> Result<Vec<KeyedSample>, GridError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let headers = rdr.headers().map_err(|e| parse_error(e, content))?.clone();
    require_column(content, &headers, "Time Stamp")?;
    require_column(content, &headers, "LBMP ($/MWHr)")?;

    let mut samples = Vec::new();
    for row in rdr.deserialize::<LmpRow>() {
        let row = row.map_err(|e| parse_error(e, content))?;
        if let Some(lmp) = row.lmp {
            samples.push(KeyedSample {
                stamp: row.stamp,
                zone: row.time_zone,
                key: Some(row.node),
                value: lmp,
            });
        }
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAL_FIXTURE: &str = "\
Time Stamp,Time Zone,Name,PTID,Load
01/02/2024 00:05:00,EST,West,61752,1700.5
01/02/2024 00:05:00,EST,N.Y.C.,61761,5200.0
01/02/2024 00:10:00,EST,West,61752,1690.0
01/02/2024 00:10:00,EST,N.Y.C.,61761,5150.5
";

    const FLOWS_FIXTURE: &str = "\
Timestamp,Interface Name,Point ID,Flow (MWH),Positive Limit (MWH),Negative Limit (MWH)
01/02/2024 00:05:00,SCH - HQ - NY,23312,1200.0,1999,-1999
01/02/2024 00:05:00,CENTRAL EAST - VC,23310,2850.0,2850,-9999
";

    #[test]
    fn pal_rows_parse_to_zone_keyed_samples() {
        let samples = parse_load(PAL_FIXTURE).unwrap();
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0].stamp, "01/02/2024 00:05:00");
        assert_eq!(samples[0].key.as_deref(), Some("West"));
        assert_eq!(samples[0].zone.as_deref(), Some("EST"));
        assert_eq!(samples[0].value, 1700.5);
    }

    #[test]
    fn pal_rows_carry_both_zone_abbreviations_in_the_fallback_hour() {
        let content = "\
Time Stamp,Time Zone,Name,PTID,Load
11/03/2024 01:30:00,EDT,West,61752,100.0
11/03/2024 01:30:00,EST,West,61752,200.0
";
        let samples = parse_load(content).unwrap();
        assert_eq!(samples[0].zone.as_deref(), Some("EDT"));
        assert_eq!(samples[1].zone.as_deref(), Some("EST"));
    }

    #[test]
    fn missing_timestamp_column_is_a_schema_break() {
        let content = "Zeit,Name,Load\nx,y,1.0\n";
        let err = parse_load(content).unwrap_err();
        match err {
            GridError::Parse { content: raw, .. } => assert!(raw.contains("Zeit")),
            other => panic!("expected Parse, got: {other:?}"),
        }
    }

    #[test]
    fn html_error_page_is_a_schema_break_with_payload_attached() {
        let content = "<html><body>503 upstream unavailable</body></html>";
        let err = parse_load(content).unwrap_err();
        match err {
            GridError::Parse { content: raw, .. } => assert!(raw.contains("503")),
            other => panic!("expected Parse, got: {other:?}"),
        }
    }

    #[test]
    fn header_only_payload_parses_to_zero_rows() {
        let content = "Time Stamp,Time Zone,Name,PTID,Load\n";
        let samples = parse_load(content).unwrap();
        assert!(samples.is_empty());
    }

    #[test]
    fn flow_rows_keep_interface_keys() {
        let samples = parse_flows(FLOWS_FIXTURE).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].key.as_deref(), Some("SCH - HQ - NY"));
        assert_eq!(samples[1].key.as_deref(), Some("CENTRAL EAST - VC"));
    }

    #[test]
    fn flows_without_interface_column_are_a_schema_break() {
        let content = "Timestamp,Flow (MWH)\n01/02/2024 00:05:00,1.0\n";
        assert!(matches!(
            parse_flows(content).unwrap_err(),
            GridError::Parse { .. }
        ));
    }

    #[test]
    fn forecast_file_sums_zones_and_skips_system_total() {
        let content = "\
Time Stamp,Capitl,N.Y.C.,NYISO
01/02/2024 13:00,1200.0,5400.0,6600.0
01/02/2024 14:00,1210.0,,
";
        let samples = parse_load_forecast(content).unwrap();
        // Row one: two zones, total skipped. Row two: one zone, empties skipped.
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].key.as_deref(), Some("Capitl"));
        assert_eq!(samples[1].value, 5400.0);
        assert_eq!(samples[2].stamp, "01/02/2024 14:00");
    }

    #[test]
    fn forecast_stamp_column_is_found_by_header_not_position() {
        let content = "\
Capitl,Time Stamp,N.Y.C.
1200.0,01/02/2024 13:00,5400.0
";
        let samples = parse_load_forecast(content).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].stamp, "01/02/2024 13:00");
        assert_eq!(samples[0].key.as_deref(), Some("Capitl"));
        assert_eq!(samples[1].key.as_deref(), Some("N.Y.C."));
    }

    #[test]
    fn lmp_rows_parse_to_node_keyed_samples() {
        let content = "\
Time Stamp,Name,PTID,LBMP ($/MWHr),Marginal Cost Losses ($/MWHr),Marginal Cost Congestion ($/MWHr)
01/02/2024 00:00,CAPITL,61757,32.11,1.20,-0.55
01/02/2024 00:00,N.Y.C.,61761,35.80,2.01,-1.10
";
        let samples = parse_lmp(content).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].key.as_deref(), Some("N.Y.C."));
        assert_eq!(samples[1].value, 35.80);
    }

    #[test]
    fn feed_urls_follow_the_daily_csv_scheme() {
        let client = NyisoClient::new(
            &ClientConfig::default(),
            Arc::new(crate::transport::HttpTransport::default()),
        );
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(
            client.feed_url(date, "pal"),
            "http://mis.nyiso.com/public/csv/pal/20240102pal.csv"
        );
    }

    #[test]
    fn alignment_is_declared_per_frequency() {
        assert_eq!(
            NyisoClient::alignment_shift(Frequency::FiveMin).unwrap(),
            Duration::minutes(5)
        );
        assert_eq!(
            NyisoClient::alignment_shift(Frequency::Hourly).unwrap(),
            Duration::zero()
        );
        assert!(matches!(
            NyisoClient::alignment_shift(Frequency::FifteenMin),
            Err(GridError::Configuration(_))
        ));
    }
}
