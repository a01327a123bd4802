//! Handle to a running ticker task

use tokio::task::JoinHandle;

/// The single live ticker. `epoch` identifies which start() spawned it so
/// that a tick already in flight when the handle is replaced can be told apart.
#[derive(Debug)]
pub struct TickHandle {
    epoch: u64,
    task: JoinHandle<()>,
}

impl TickHandle {
    pub fn new(epoch: u64, task: JoinHandle<()>) -> Self {
        Self { epoch, task }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Abort the ticker task
    pub fn cancel(self) {
        self.task.abort();
    }
}
