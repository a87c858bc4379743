use std::io::{self, Write};

use chrono::DateTime;

use crate::application::use_cases::traffic::{traffic_series, TrafficPoint};
use crate::domain::endpoint::Traffic;

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn spark_line(values: &[u64]) -> String {
    let max = values.iter().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|&value| {
            if max == 0 {
                SPARKS[0]
            } else {
                let level = (value as f64 / max as f64 * (SPARKS.len() - 1) as f64).round();
                SPARKS[level as usize]
            }
        })
        .collect()
}

fn time_label(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// Dual-series traffic chart. The series is derived from `traffic` on every
/// render.
pub struct TrafficChart {
    points: Vec<TrafficPoint>,
    compact: bool,
}

impl TrafficChart {
    pub fn new(traffic: &Traffic) -> Self {
        Self {
            points: traffic_series(traffic),
            compact: false,
        }
    }

    /// No axis labels; fits inside a summary card.
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }

    pub fn points(&self) -> &[TrafficPoint] {
        &self.points
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.points.is_empty() {
            return writeln!(out, "  (no traffic)");
        }
        let success: Vec<u64> = self.points.iter().map(|p| p.success).collect();
        let failure: Vec<u64> = self.points.iter().map(|p| p.failure).collect();

        if self.compact {
            writeln!(out, "  ok   {}", spark_line(&success))?;
            return writeln!(out, "  fail {}", spark_line(&failure));
        }

        writeln!(out, "  {:<10} {:>10} {:>10}", "time", "success", "failed")?;
        for point in &self.points {
            writeln!(
                out,
                "  {:<10} {:>10} {:>10}",
                time_label(point.timestamp_ms),
                point.success,
                point.failure
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traffic() -> Traffic {
        let mut traffic = Traffic::new();
        traffic.insert("SUCCESS".to_string(), vec![(1000, 5), (1001, 10)]);
        traffic.insert("FAILURE".to_string(), vec![(1000, 1)]);
        traffic
    }

    #[test]
    fn test_compact_chart_has_no_labels() {
        let chart = TrafficChart::new(&traffic()).compact();
        let mut out = Vec::new();
        chart.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(chart.points()[0].timestamp_ms, 1_000_000);
        assert!(!text.contains("time"));
        assert!(text.contains("ok   ▅█"));
    }

    #[test]
    fn test_full_chart_lists_every_point() {
        let mut out = Vec::new();
        TrafficChart::new(&traffic()).render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("00:16:40"));
        assert!(text.contains("00:16:41"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_empty_traffic() {
        let mut out = Vec::new();
        TrafficChart::new(&Traffic::new()).compact().render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  (no traffic)\n");
    }
}
