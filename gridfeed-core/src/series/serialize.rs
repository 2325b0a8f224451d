//! Attaching source/market tags to normalized points.

use crate::domain::{DataKind, Frequency, Market, Payload, Point, Record};

/// Tags attached to every record of one response.
#[derive(Debug, Clone)]
pub struct Extras {
    pub ba_name: &'static str,
    pub freq: Frequency,
    pub market: Market,
    /// Price component label; only reaches the output for price records.
    pub lmp_type: &'static str,
}

/// Emit canonical records for a sliced series. Pure and total: every input
/// point becomes exactly one record. For price data the series key becomes
/// the node id.
pub fn serialize(points: Vec<Point>, kind: DataKind, extras: &Extras) -> Vec<Record> {
    points
        .into_iter()
        .map(|point| {
            let payload = match kind {
                DataKind::Load => Payload::Load {
                    load_mw: point.value,
                },
                DataKind::Trade => Payload::Trade {
                    net_exp_mw: point.value,
                },
                DataKind::Lmp => Payload::Price {
                    node_id: point.series_key.unwrap_or_default(),
                    lmp_type: extras.lmp_type.to_string(),
                    lmp: point.value,
                },
            };
            Record {
                ba_name: extras.ba_name.to_string(),
                timestamp: point.timestamp,
                freq: extras.freq,
                market: extras.market,
                payload,
            }
        })
        .collect()
}
