//! Core library for the metrics dashboard: exposition parsing, rolling
//! history, presenter state and the polling loop.

pub mod config;
mod dashboard;
mod demo;
mod error;
pub mod exposition;
mod history;
mod models;
mod poller;

pub use config::DashboardConfig;
pub use dashboard::{
    Banner, ChartView, DashboardState, DashboardView, DiagnosticStrip, LoadingView, SummaryCards,
    View, WAITING_SUBTITLE, WAITING_TITLE,
};
pub use demo::synthetic_reading;
pub use error::{DashboardError, FetchError, Result};
pub use exposition::parse_metrics;
pub use history::SampleHistory;
pub use models::{ConnectionState, MetricsReading, Sample};
pub use poller::{poll_once, MetricsSource, PollOutcome, PollerHandle};
