//! Parser for the plain-text exposition payload.
//!
//! Only three gauges are recognized; every other line is skipped. The parser
//! is total: it never fails, malformed numbers surface as `NaN`.

use crate::models::MetricsReading;

pub const CPU_USAGE_PERCENT: &str = "cpu_usage_percent";
pub const MEMORY_USAGE_BYTES: &str = "memory_usage_bytes";
pub const MEMORY_TOTAL_BYTES: &str = "memory_total_bytes";

/// Bytes per GiB (1024³).
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Extract cpu / memory / total memory from an exposition-format payload.
///
/// A later line for the same metric wins.
pub fn parse_metrics(payload: &str) -> MetricsReading {
    let mut reading = MetricsReading::default();

    for line in payload.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        if line.starts_with(CPU_USAGE_PERCENT) {
            reading.cpu = Some(last_value(line));
        } else if line.starts_with(MEMORY_USAGE_BYTES) {
            reading.memory = Some(last_value(line) / BYTES_PER_GIB);
        } else if line.starts_with(MEMORY_TOTAL_BYTES) {
            reading.total_memory = Some(last_value(line) / BYTES_PER_GIB);
        }
    }

    reading
}

fn last_value(line: &str) -> f64 {
    line.split_whitespace()
        .last()
        .and_then(|token| token.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
