//! 轮询器：启动即发起一次请求，之后按固定周期重复，直到被关闭。
//!
//! 每个 tick 的请求在独立任务中执行，彼此可以重叠；结果带有递增序号，
//! 由展示层丢弃过期结果。关闭时取消定时器以及所有在途请求。

use crate::error::FetchError;
use crate::exposition::parse_metrics;
use crate::models::MetricsReading;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

/// Where the exposition payload comes from.
pub trait MetricsSource: Send + Sync + 'static {
    /// Fetch the raw exposition text.
    fn fetch(&self) -> impl Future<Output = std::result::Result<String, FetchError>> + Send;
}

/// Result of one poll, tagged with the order in which it was issued.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub seq: u64,
    pub result: std::result::Result<MetricsReading, FetchError>,
}

/// Fetch and parse once.
pub async fn poll_once<S: MetricsSource>(
    source: &S,
) -> std::result::Result<MetricsReading, FetchError> {
    source.fetch().await.map(|body| parse_metrics(&body))
}

/// 轮询任务句柄。drop 时同样会取消任务（不等待在途请求）。
#[derive(Debug)]
pub struct PollerHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// 启动轮询：立即请求一次，之后每 `period` 请求一次。
    pub fn start<S: MetricsSource>(
        source: Arc<S>,
        period: Duration,
        outcomes: mpsc::UnboundedSender<PollOutcome>,
    ) -> Self {
        info!(period_ms = period.as_millis() as u64, "poller started");
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(run(source, period, outcomes, stopped));
        Self {
            stop: Some(stop),
            task: Some(task),
        }
    }

    /// 停止轮询并等待定时器与所有在途请求退出；返回后不会再有任何结果送达。
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
            info!("poller stopped");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run<S: MetricsSource>(
    source: Arc<S>,
    period: Duration,
    outcomes: mpsc::UnboundedSender<PollOutcome>,
    mut stopped: oneshot::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight = JoinSet::new();
    let mut next_seq: u64 = 0;

    loop {
        tokio::select! {
            biased;

            // 句柄被 drop 时发送端也会关闭，同样视为停止
            _ = &mut stopped => break,
            _ = outcomes.closed() => {
                debug!("outcome receiver dropped, poller exiting");
                break;
            }
            _ = ticker.tick() => {
                let seq = next_seq;
                next_seq += 1;
                debug!(seq, in_flight = in_flight.len(), "poll tick");

                let source = Arc::clone(&source);
                let outcomes = outcomes.clone();
                in_flight.spawn(async move {
                    let result = poll_once(source.as_ref()).await;
                    if let Err(err) = &result {
                        warn!(seq, error = %err, "metrics fetch failed");
                    }
                    let _ = outcomes.send(PollOutcome { seq, result });
                });
            }
            Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
        }
    }

    // 中止并等待所有在途请求，正在执行的请求在此之前完成其发送
    in_flight.shutdown().await;
}
