use super::{poll_once, MetricsSource, PollOutcome, PollerHandle};
use crate::dashboard::DashboardState;
use crate::error::FetchError;
use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const PERIOD: Duration = Duration::from_secs(2);

/// Answers each call after a scripted delay; the body carries the call index.
struct ScriptedSource {
    calls: AtomicUsize,
    delays: Vec<Duration>,
    fail: bool,
}

impl ScriptedSource {
    fn instant() -> Self {
        Self::with_delays(Vec::new())
    }

    fn with_delays(delays: Vec<Duration>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delays,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::instant()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetricsSource for ScriptedSource {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.get(n).copied().unwrap_or_default();
        let fail = self.fail;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(FetchError::Connect("connection refused".into()));
            }
            Ok(format!(
                "# HELP cpu_usage_percent test\ncpu_usage_percent {n}\nmemory_usage_bytes 1073741824\n"
            ))
        }
    }
}

fn drain(rx: &mut mpsc::UnboundedReceiver<PollOutcome>) -> Vec<PollOutcome> {
    let mut out = Vec::new();
    while let Ok(outcome) = rx.try_recv() {
        out.push(outcome);
    }
    out
}

#[tokio::test(start_paused = true)]
async fn polls_immediately_then_every_period() {
    let source = Arc::new(ScriptedSource::instant());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), PERIOD, tx);

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_millis(4500)).await;
    assert_eq!(source.calls(), 3);
    poller.shutdown().await;

    let seqs: Vec<u64> = drain(&mut rx).iter().map(|o| o.seq).collect();
    assert_eq!(seqs, vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn nothing_fires_after_shutdown() {
    let source = Arc::new(ScriptedSource::instant());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), PERIOD, tx);

    tokio::time::sleep(Duration::from_millis(4500)).await;
    poller.shutdown().await;
    let before = drain(&mut rx).len();
    let calls = source.calls();

    tokio::time::sleep(PERIOD * 10).await;
    assert!(drain(&mut rx).is_empty());
    assert_eq!(source.calls(), calls);
    assert_eq!(before, calls);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_in_flight_requests() {
    let source = Arc::new(ScriptedSource::with_delays(vec![Duration::from_secs(4)]));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), Duration::from_secs(60), tx);

    tokio::time::sleep(Duration::from_secs(1)).await;
    poller.shutdown().await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(source.calls(), 1);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_polling() {
    let source = Arc::new(ScriptedSource::instant());
    let (tx, _rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), PERIOD, tx);
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(poller);

    tokio::time::sleep(PERIOD * 5).await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn poller_exits_when_receiver_is_dropped() {
    let source = Arc::new(ScriptedSource::instant());
    let (tx, rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), PERIOD, tx);
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(rx);

    tokio::time::sleep(PERIOD * 3).await;
    assert_eq!(source.calls(), 1);
    // the task has already exited on its own
    poller.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn late_response_is_discarded_by_the_dashboard() {
    // seq 0 takes 3s, seq 1 answers at once: seq 1 lands first
    let source = Arc::new(ScriptedSource::with_delays(vec![Duration::from_secs(3)]));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), PERIOD, tx);

    tokio::time::sleep(Duration::from_millis(3500)).await;
    poller.shutdown().await;

    let outcomes = drain(&mut rx);
    let seqs: Vec<u64> = outcomes.iter().map(|o| o.seq).collect();
    assert_eq!(seqs, vec![1, 0]);

    let mut rng = StdRng::seed_from_u64(0);
    let mut state = DashboardState::new(30);
    let applied: Vec<bool> = outcomes
        .into_iter()
        .map(|o| state.apply(o, Local::now(), &mut rng))
        .collect();
    assert_eq!(applied, vec![true, false]);
    assert_eq!(state.current().cpu, Some(1.0));
    assert_eq!(state.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn failures_are_delivered_as_outcomes() {
    let source = Arc::new(ScriptedSource::failing());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source, PERIOD, tx);

    tokio::time::sleep(Duration::from_millis(100)).await;
    poller.shutdown().await;

    let outcomes = drain(&mut rx);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0].result,
        Err(FetchError::Connect("connection refused".into()))
    );
}

/// Holds its worker thread for the whole fetch, so an abort cannot
/// interrupt it before it answers.
struct BlockingSource {
    calls: AtomicUsize,
    hold: Duration,
}

impl MetricsSource for BlockingSource {
    fn fetch(&self) -> impl Future<Output = Result<String, FetchError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let hold = self.hold;
        async move {
            std::thread::sleep(hold);
            Ok("cpu_usage_percent 1\n".to_string())
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_waits_for_running_fetches_on_multi_thread_runtime() {
    let source = Arc::new(BlockingSource {
        calls: AtomicUsize::new(0),
        hold: Duration::from_millis(500),
    });
    let (tx, mut rx) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(source.clone(), Duration::from_secs(60), tx);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    poller.shutdown().await;
    let at_shutdown = drain(&mut rx).len();

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(at_shutdown <= 1);
    assert!(
        drain(&mut rx).is_empty(),
        "outcome delivered after shutdown returned"
    );
}

#[tokio::test]
async fn poll_once_parses_body() {
    let reading = poll_once(&ScriptedSource::instant()).await.unwrap();
    assert_eq!(reading.cpu, Some(0.0));
    assert_eq!(reading.memory, Some(1.0));
    assert_eq!(reading.total_memory, None);
}
