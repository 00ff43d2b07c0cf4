//! Bounded worker pool for concurrent probing.
//!
//! Workers pull application definitions off a shared queue, probe them on
//! the blocking thread pool, and push outcomes into the results channel.
//! The pool size is fixed at spawn time regardless of catalog size.
//!
//! # Shutdown
//!
//! A worker exits when any of these happen:
//!
//! - the work queue is drained and closed
//! - the cancellation token fires
//! - the results channel is closed (collector gone)
//!
//! The results channel closes naturally once every worker has exited and
//! dropped its sender, which is what signals the collector that no more
//! outcomes will arrive. A worker re-checks the token right before sending,
//! so no outcome is pushed after cancellation is observed.

use std::sync::Arc;

use scout_core::{AppDefinition, ProbeError, ProbeOutcome};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::probe::{probe_app, PathProbe};

/// Shared work queue handed to each worker.
///
/// Wrapping the receiver in a `Mutex` gives exactly-once delivery: only one
/// worker can dequeue at a time, and `mpsc` removes each item as it is
/// received.
pub(crate) type WorkQueue = Arc<Mutex<mpsc::Receiver<AppDefinition>>>;

/// A fixed-size pool of probe workers.
///
/// Dropping the pool without calling [`join`](Self::join) leaves workers
/// running until their normal exit conditions; `join` is the barrier that
/// guarantees they are gone.
#[derive(Debug)]
pub(crate) struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `count` workers over the shared queue.
    ///
    /// The pool takes ownership of `results` and drops it after handing a
    /// clone to each worker, so the channel closes exactly when the last
    /// worker exits.
    pub(crate) fn spawn(
        count: usize,
        fs: Arc<dyn PathProbe>,
        queue: WorkQueue,
        results: mpsc::Sender<ProbeOutcome>,
        cancel: CancellationToken,
    ) -> Self {
        debug!(workers = count, "spawning worker pool");

        let handles = (0..count)
            .map(|id| {
                let fs = Arc::clone(&fs);
                let queue = Arc::clone(&queue);
                let results = results.clone();
                let cancel = cancel.clone();
                tokio::spawn(worker_loop(id, fs, queue, results, cancel))
            })
            .collect();

        Self { handles }
    }

    /// Waits for every worker to exit.
    pub(crate) async fn join(self) {
        for handle in self.handles {
            if let Err(err) = handle.await {
                // Workers have no panicking paths; a join error here means
                // the runtime is shutting down underneath us.
                warn!(error = %err, "worker task did not shut down cleanly");
            }
        }
    }
}

async fn worker_loop(
    id: usize,
    fs: Arc<dyn PathProbe>,
    queue: WorkQueue,
    results: mpsc::Sender<ProbeOutcome>,
    cancel: CancellationToken,
) {
    loop {
        // Hold the queue lock only for the dequeue itself. Checking the
        // token inside the select means a cancelled worker never claims
        // another item.
        let app = {
            let mut rx = queue.lock().await;
            tokio::select! {
                () = cancel.cancelled() => break,
                item = rx.recv() => match item {
                    Some(app) => app,
                    None => break,
                },
            }
        };

        trace!(worker = id, app = %app.name, "probing");
        let outcome = run_probe(&fs, app).await;

        // Re-check the token before publishing: an outcome must never land
        // in the channel after cancellation has been observed.
        tokio::select! {
            () = cancel.cancelled() => break,
            sent = results.send(outcome) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    trace!(worker = id, "worker exiting");
}

/// Runs one probe on the blocking pool.
///
/// `spawn_blocking` failure (runtime shutdown, or a panic despite the
/// no-panic contract) is converted into an aborted outcome for the same
/// application rather than propagated.
async fn run_probe(fs: &Arc<dyn PathProbe>, app: AppDefinition) -> ProbeOutcome {
    let fs = Arc::clone(fs);
    let probe_target = app.clone();

    match tokio::task::spawn_blocking(move || probe_app(fs.as_ref(), &probe_target)).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(app = %app.name, error = %err, "probe task aborted");
            ProbeOutcome::failed(app, ProbeError::aborted(err.to_string()))
        }
    }
}
