use super::DashboardState;
use crate::models::ConnectionState;
use serde::Serialize;
use url::Url;

pub const STARTUP_TITLE: &str = "Starting up system monitor...";
pub const STARTUP_SUBTITLE: &str = "Connecting to backend metrics";
pub const WAITING_TITLE: &str = "Waiting for data...";
pub const WAITING_SUBTITLE: &str = "Metrics will appear here shortly";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum View {
    Loading(LoadingView),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadingView {
    pub title: &'static str,
    pub subtitle: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub banner: Option<Banner>,
    pub cards: SummaryCards,
    pub chart: ChartView,
    pub diagnostics: DiagnosticStrip,
}

/// Demo Mode warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub title: &'static str,
    pub message: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub cpu: String,
    pub memory: String,
    pub total_memory: Option<String>,
}

/// Chart series, x is the sample index in the window (oldest = 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub labels: Vec<String>,
    pub cpu: Vec<(f64, f64)>,
    pub memory: Vec<(f64, f64)>,
    pub y_max: f64,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticStrip {
    pub connection: ConnectionState,
    pub status: &'static str,
    pub data_points: usize,
    pub last_update: String,
    pub endpoint: String,
}

pub(super) fn build(state: &DashboardState, endpoint: &str) -> View {
    if state.is_loading() {
        return View::Loading(LoadingView {
            title: STARTUP_TITLE,
            subtitle: STARTUP_SUBTITLE,
        });
    }

    let banner = (!state.error().is_empty()).then(|| Banner {
        title: "Demo Mode",
        message: state.error().to_string(),
        note: demo_note(endpoint),
    });

    View::Dashboard(DashboardView {
        banner,
        cards: cards(state),
        chart: chart(state),
        diagnostics: DiagnosticStrip {
            connection: state.connection(),
            status: state.connection().label(),
            data_points: state.history().len(),
            last_update: state
                .history()
                .latest()
                .map(|s| s.time.clone())
                .unwrap_or_else(|| "-".into()),
            endpoint: endpoint.to_string(),
        },
    })
}

fn demo_note(endpoint: &str) -> String {
    match Url::parse(endpoint)
        .ok()
        .and_then(|url| url.port_or_known_default())
    {
        Some(port) => format!("Showing sample data. Make sure backend is running on port {port}."),
        None => "Showing sample data. Make sure backend is running.".into(),
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn cards(state: &DashboardState) -> SummaryCards {
    let current = state.current();
    SummaryCards {
        cpu: finite(current.cpu)
            .map(|v| format!("{v:.1}%"))
            .unwrap_or_else(|| NOT_AVAILABLE.into()),
        memory: finite(current.memory)
            .map(|v| format!("{v:.1} GB"))
            .unwrap_or_else(|| NOT_AVAILABLE.into()),
        total_memory: finite(current.total_memory).map(|v| format!("{v:.1} GB")),
    }
}

fn chart(state: &DashboardState) -> ChartView {
    let mut labels = Vec::with_capacity(state.history().len());
    let mut cpu = Vec::new();
    let mut memory = Vec::new();

    for (i, sample) in state.history().iter().enumerate() {
        let x = i as f64;
        labels.push(sample.time.clone());
        if let Some(v) = finite(sample.cpu) {
            cpu.push((x, v));
        }
        if let Some(v) = finite(sample.memory) {
            memory.push((x, v));
        }
    }

    let peak = cpu
        .iter()
        .chain(memory.iter())
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max);
    // 留 10% 顶部空间，至少为 1
    let y_max = (peak + peak / 10.0).ceil().max(1.0);

    ChartView {
        labels,
        cpu,
        memory,
        y_max,
    }
}
