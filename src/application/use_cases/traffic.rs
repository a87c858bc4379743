use std::collections::BTreeMap;

use crate::domain::endpoint::Traffic;

/// One row of the dual-series traffic chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficPoint {
    /// Milliseconds since the unix epoch.
    pub timestamp_ms: i64,
    pub success: u64,
    pub failure: u64,
}

/// Groups the per-bucket series into one row per timestamp.
///
/// Bucket names are matched case-insensitively against `success` and
/// `failure`; a bucket missing at a timestamp counts as zero. Rows where both
/// counts are zero are dropped and the result is sorted by timestamp.
pub fn traffic_series(traffic: &Traffic) -> Vec<TrafficPoint> {
    let mut grouped: BTreeMap<i64, TrafficPoint> = BTreeMap::new();

    for (bucket, samples) in traffic {
        let bucket = bucket.to_lowercase();
        for &(timestamp, count) in samples {
            let point = grouped.entry(timestamp).or_insert(TrafficPoint {
                timestamp_ms: timestamp.saturating_mul(1000),
                success: 0,
                failure: 0,
            });
            match bucket.as_str() {
                "success" => point.success = count,
                "failure" => point.failure = count,
                _ => {}
            }
        }
    }

    grouped
        .into_values()
        .filter(|point| point.success != 0 || point.failure != 0)
        .collect()
}

/// Short human form for totals: `1.5M`, `12.0k`, `999`.
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}
