//! Single-slot debouncing on the tokio runtime.
//!
//! A [`Debouncer`] holds at most one waiting task. Scheduling a new task
//! replaces whatever is still waiting, so only the last call inside the
//! window runs. Once a task's window has elapsed it runs to completion.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::trace;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` after the window elapses unless another call replaces it
    /// first. Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let slot = Arc::clone(&self.slot);
        let mut guard = self.slot.lock();
        guard.generation += 1;
        let generation = guard.generation;
        guard.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if slot.lock().generation != generation {
                trace!("debounced task superseded");
                return;
            }
            task.await;
        }));
    }

    /// Drop the waiting task, if any. A task already running is left alone.
    pub fn cancel(&self) {
        let mut guard = self.slot.lock();
        guard.generation += 1;
        guard.handle = None;
    }

    /// Whether the latest scheduled task has not yet finished.
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
