use crate::client::HttpSource;
use crate::tui::{self, spawn_input, UiEvent};
use chrono::Local;
use metricdash_core::{DashboardConfig, DashboardState, PollerHandle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// 全屏实时看板：启动轮询、按结果重绘，q / Esc / Ctrl+C 退出。
pub async fn watch(config: &DashboardConfig, source: HttpSource) -> anyhow::Result<()> {
    let endpoint = source.endpoint().to_string();
    info!(endpoint = %endpoint, "starting dashboard");

    let mut terminal = tui::enter()?;
    // 任何退出路径（含 panic）都要恢复终端
    let _restore = scopeguard::guard((), |_| {
        let _ = tui::leave();
    });

    let (mut events, _input) = spawn_input();
    let (tx, mut outcomes) = mpsc::unbounded_channel();
    let poller = PollerHandle::start(Arc::new(source), config.interval, tx);

    let mut state = DashboardState::new(config.history);
    let mut rng = StdRng::from_entropy();
    terminal.draw(|f| tui::draw(f, &state.view(&endpoint)))?;

    loop {
        tokio::select! {
            Some(outcome) = outcomes.recv() => {
                if state.apply(outcome, Local::now(), &mut rng) {
                    terminal.draw(|f| tui::draw(f, &state.view(&endpoint)))?;
                }
            }
            event = events.recv() => match event {
                Some(UiEvent::Redraw) => {
                    terminal.draw(|f| tui::draw(f, &state.view(&endpoint)))?;
                }
                Some(UiEvent::Quit) | None => break,
            },
        }
    }

    poller.shutdown().await;
    info!(samples = state.history().len(), "dashboard closed");
    Ok(())
}
