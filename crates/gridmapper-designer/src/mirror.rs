//! Best-effort forwarding of local element changes to the element store.
//!
//! The canvas mutates first; the mirror queues the resulting change sets and
//! a single worker task applies them to the repository in submission order.
//! Failures are logged and counted, never rolled back.

use crate::canvas::{Change, ChangeSet};
use gridmapper_core::MapElement;
use gridmapper_store::Repository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

enum Command {
    Apply(Change),
    Flush(oneshot::Sender<()>),
}

pub struct RemoteMirror {
    tx: mpsc::UnboundedSender<Command>,
    failures: Arc<AtomicUsize>,
    worker: JoinHandle<()>,
}

impl RemoteMirror {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(elements: Arc<dyn Repository<MapElement>>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
        let failures = Arc::new(AtomicUsize::new(0));
        let worker_failures = failures.clone();

        let worker = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Apply(change) => {
                        if let Err(e) = apply(elements.as_ref(), &change).await {
                            worker_failures.fetch_add(1, Ordering::Relaxed);
                            warn!(id = %change.element_id(), error = %e, "element mirror write failed");
                        }
                    }
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!("element mirror stopped");
        });

        Self {
            tx,
            failures,
            worker,
        }
    }

    /// Queue a change set. Changes to scratch elements are dropped.
    pub fn submit(&self, changes: ChangeSet) {
        for change in changes {
            if change.map_id().is_none() {
                continue;
            }
            if self.tx.send(Command::Apply(change)).is_err() {
                warn!("element mirror worker is gone, dropping change");
                return;
            }
        }
    }

    /// Wait until everything queued before this call has been applied.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(done_tx)).is_ok() {
            let _ = done_rx.await;
        }
    }

    /// Writes that failed since the mirror started.
    pub fn failure_count(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RemoteMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteMirror")
            .field("failures", &self.failure_count())
            .finish_non_exhaustive()
    }
}

impl Drop for RemoteMirror {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn apply(
    elements: &dyn Repository<MapElement>,
    change: &Change,
) -> gridmapper_core::StoreResult<()> {
    match change {
        Change::Created(element) => elements.create(element.clone()).await.map(|_| ()),
        Change::Updated(element) => elements.update(element.clone()).await.map(|_| ()),
        Change::Deleted { id, .. } => elements.delete(*id).await,
    }
}
