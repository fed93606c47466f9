use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    Redraw,
}

/// Stops the reader thread when dropped.
pub struct InputHandle {
    stop: Arc<AtomicBool>,
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// 在阻塞线程中读取键盘/窗口事件，通过 channel 转发给主循环。
pub fn spawn_input() -> (mpsc::Receiver<UiEvent>, InputHandle) {
    let (tx, rx) = mpsc::channel::<UiEvent>(16);
    let stop = Arc::new(AtomicBool::new(false));
    let stop_for_thread = stop.clone();

    tokio::task::spawn_blocking(move || {
        loop {
            if stop_for_thread.load(Ordering::Relaxed) {
                break;
            }
            match event::poll(Duration::from_millis(50)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!(error = %e, "failed to poll terminal events");
                    let _ = tx.blocking_send(UiEvent::Quit);
                    break;
                }
            }
            let ui_event = match event::read() {
                Ok(ev) => translate(ev),
                Err(e) => {
                    warn!(error = %e, "failed to read terminal event");
                    Some(UiEvent::Quit)
                }
            };
            if let Some(ui_event) = ui_event {
                if tx.blocking_send(ui_event).is_err() || ui_event == UiEvent::Quit {
                    break;
                }
            }
        }
    });

    (rx, InputHandle { stop })
}

fn translate(ev: Event) -> Option<UiEvent> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            // 只处理按下事件，忽略释放事件（Windows 上会触发两次）
            if kind != KeyEventKind::Press {
                return None;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(UiEvent::Quit)
                }
                _ => None,
            }
        }
        Event::Resize(_, _) => Some(UiEvent::Redraw),
        _ => None,
    }
}
