use chrono::{DateTime, Local};
use serde::Serialize;
use serde_with::skip_serializing_none;

/// Values of the three tracked gauges. Memory figures are in GiB; a field is
/// `None` when its metric line was absent.
#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReading {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub total_memory: Option<f64>,
}

/// One point of the rolling history.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub cpu: Option<f64>,
    pub memory: Option<f64>,
    pub total_memory: Option<f64>,
    /// Local wall-clock label, `HH:MM:SS`.
    pub time: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Sample {
    pub fn new(reading: MetricsReading, at: DateTime<Local>) -> Self {
        Self {
            cpu: reading.cpu,
            memory: reading.memory,
            total_memory: reading.total_memory,
            time: at.format("%H:%M:%S").to_string(),
            timestamp: at.timestamp_millis(),
        }
    }

    pub fn reading(&self) -> MetricsReading {
        MetricsReading {
            cpu: self.cpu,
            memory: self.memory,
            total_memory: self.total_memory,
        }
    }
}

/// Connection status derived from the loading flag and the error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Loading,
    Live,
    Demo,
}

impl ConnectionState {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionState::Loading => "Connecting",
            ConnectionState::Live => "Connected",
            ConnectionState::Demo => "Demo Mode",
        }
    }
}
