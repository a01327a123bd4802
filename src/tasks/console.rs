//! Console view background task

use tokio::{io::AsyncWriteExt, sync::watch};
use tracing::{debug, warn};

use crate::{presentation::TimerView, state::TimerState};

/// Render one status line for the console
pub fn render_line(state: &TimerState) -> String {
    let view = TimerView::from_state(state);
    format!(
        "{:<5} {}  {}",
        view.session_label,
        view.clock,
        if view.is_running { "running" } else { "stopped" }
    )
}

/// Redraw the status line on stdout every time the timer state changes
pub async fn console_view_task(mut updates: watch::Receiver<TimerState>) {
    debug!("Starting console view task");
    let mut stdout = tokio::io::stdout();

    loop {
        let line = render_line(&updates.borrow_and_update());
        if let Err(e) = stdout.write_all(format!("\r{}\x1b[K", line).as_bytes()).await {
            warn!("Console view stopped, failed to write: {}", e);
            break;
        }
        if let Err(e) = stdout.flush().await {
            warn!("Console view stopped, failed to flush: {}", e);
            break;
        }

        if updates.changed().await.is_err() {
            debug!("Timer engine dropped, console view exiting");
            break;
        }
    }
}
