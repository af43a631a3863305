use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Runs the most recently scheduled task after a quiet period.
///
/// Scheduling a new task cancels the pending one, so a burst of calls
/// results in a single execution of the last task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` to run once the delay elapses without another call.
    ///
    /// The task runs on the blocking thread pool, so it may do file I/O.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tokio::task::spawn_blocking(task).await {
                warn!("Debounced task failed: {}", e);
            }
        }));
    }

    /// Cancels the pending task. Returns true if a task had not finished yet.
    ///
    /// A task that already started keeps running to completion on the
    /// blocking pool; callers must serialize its side effects themselves.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// Returns true while a scheduled task is waiting to run.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}
