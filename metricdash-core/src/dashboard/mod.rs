//! Presenter state: current values, rolling history and connection status.
//!
//! State changes only when a poll resolves. `Loading` lasts until the first
//! outcome, after which the dashboard alternates freely between `Live` and
//! `Demo` depending on each poll.

mod view;

pub use view::{
    Banner, ChartView, DashboardView, DiagnosticStrip, LoadingView, SummaryCards, View,
    WAITING_SUBTITLE, WAITING_TITLE,
};

use crate::demo::synthetic_reading;
use crate::error::FetchError;
use crate::history::SampleHistory;
use crate::models::{ConnectionState, MetricsReading, Sample};
use crate::poller::PollOutcome;
use chrono::{DateTime, Local};
use rand::Rng;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct DashboardState {
    history: SampleHistory,
    current: MetricsReading,
    /// Empty while the last poll succeeded.
    error: String,
    loading: bool,
    last_seq: Option<u64>,
}

impl DashboardState {
    pub fn new(history: usize) -> Self {
        Self {
            history: SampleHistory::new(history),
            current: MetricsReading::default(),
            error: String::new(),
            loading: true,
            last_seq: None,
        }
    }

    pub fn connection(&self) -> ConnectionState {
        if self.loading {
            ConnectionState::Loading
        } else if self.error.is_empty() {
            ConnectionState::Live
        } else {
            ConnectionState::Demo
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn current(&self) -> MetricsReading {
        self.current
    }

    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    /// Apply a poll outcome. Returns `false` when the outcome is older than
    /// one already applied and was dropped.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        outcome: PollOutcome,
        at: DateTime<Local>,
        rng: &mut R,
    ) -> bool {
        if matches!(self.last_seq, Some(last) if outcome.seq <= last) {
            debug!(seq = outcome.seq, last = ?self.last_seq, "dropping stale poll outcome");
            return false;
        }
        self.last_seq = Some(outcome.seq);

        match outcome.result {
            Ok(reading) => self.record_success(reading, at),
            Err(err) => self.record_failure(&err, at, rng),
        }
        true
    }

    pub fn record_success(&mut self, reading: MetricsReading, at: DateTime<Local>) {
        let before = self.connection();
        self.error.clear();
        self.record(reading, at);
        if before == ConnectionState::Demo {
            info!("metrics endpoint reachable again, leaving demo mode");
        }
    }

    /// 请求失败：记录错误并用演示数据填充，保证界面总有数据可画。
    pub fn record_failure<R: Rng + ?Sized>(
        &mut self,
        err: &FetchError,
        at: DateTime<Local>,
        rng: &mut R,
    ) {
        let before = self.connection();
        self.error = format!("Backend connection issue: {err}");
        self.record(synthetic_reading(rng), at);
        if before != ConnectionState::Demo {
            warn!(error = %err, "metrics endpoint unreachable, switching to demo mode");
        }
    }

    fn record(&mut self, reading: MetricsReading, at: DateTime<Local>) {
        self.current = reading;
        self.history.push(Sample::new(reading, at));
        self.loading = false;
    }

    /// Render-ready description of the dashboard. Pure function of the state.
    pub fn view(&self, endpoint: &str) -> View {
        view::build(self, endpoint)
    }
}
