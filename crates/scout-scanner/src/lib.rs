//! Concurrent application discovery engine.
//!
//! This crate answers one question for a catalog of known applications:
//! which of them have a config file on this machine? It probes candidate
//! paths with a bounded worker pool, restores catalog order in the result,
//! and publishes progress through an observable state channel.
//!
//! # Overview
//!
//! The main entry point is [`Scanner`], which combines:
//!
//! - [`AppCatalog`]: Embedded application definitions plus user overrides
//! - [`PathProbe`]: Filesystem existence checks, swappable for tests
//! - a bounded worker pool feeding a catalog-ordered collector
//! - [`ScanState`]: Observable lifecycle published over a watch channel
//!
//! # Example
//!
//! ```ignore
//! use scout_scanner::{AppCatalog, Scanner};
//! use scout_core::ScanConfig;
//!
//! let catalog = AppCatalog::load(&Default::default())?;
//! let scanner = Scanner::new(ScanConfig::default())?;
//!
//! let snapshot = scanner.scan(catalog.expanded()).await?;
//! for status in &snapshot.results {
//!     println!("{} {} {}", status.status.marker(), status.icon, status.name);
//! }
//! ```
//!
//! # Streaming API
//!
//! For live UI updates, use [`Scanner::scan_streaming`] to receive a
//! [`ScanUpdate`] per probed application, or [`Scanner::spawn`] for a
//! [`ScanHandle`] that drives the scan in the background and exposes the
//! observable state machine.
//!
//! # Concurrency model
//!
//! ```text
//! Scanner::scan
//!     │
//!     ├── work queue (mpsc, one entry per catalog app)
//!     │       │
//!     │       └── WorkerPool (N workers, shared dequeue)
//!     │               │
//!     │               └── spawn_blocking probe per app
//!     │
//!     ├── results channel (bounded, closed by last worker)
//!     │       │
//!     │       └── ResultCollector (catalog-order slots)
//!     │
//!     └── watchdog (deadline → cancellation)
//! ```
//!
//! Cancellation is all-or-nothing: a stopped or timed-out scan returns an
//! error and publishes no snapshot, after every worker has been joined.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod collector;
mod error;
mod handle;
mod pool;
mod probe;
mod registry;
mod state;

pub use error::{CatalogError, ScanError, StateError};
pub use handle::ScanHandle;
pub use probe::{probe_app, PathProbe, RealFs};
pub use registry::AppCatalog;
pub use state::ScanState;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use scout_core::{AppDefinition, ProbeOutcome, ScanConfig, ScanSnapshot};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use collector::ResultCollector;
use pool::WorkerPool;

/// Update sent during a streaming scan attempt.
///
/// Updates arrive in this order:
///
/// 1. [`ScanUpdate::Started`] - once, before any probing
/// 2. [`ScanUpdate::Probed`] - per application, in completion order
/// 3. [`ScanUpdate::Completed`] or [`ScanUpdate::Failed`] - once, last
///
/// The `Probed` variant is boxed to keep the enum small for channel
/// transmission.
#[derive(Debug, Clone)]
pub enum ScanUpdate {
    /// The scan attempt began.
    Started {
        /// Number of applications that will be probed.
        total: usize,
    },

    /// One application was probed.
    ///
    /// Arrival order is completion order, not catalog order; the final
    /// snapshot restores catalog order.
    Probed(Box<ProbeOutcome>),

    /// The scan finished; the snapshot is final.
    Completed(ScanSnapshot),

    /// The scan terminated without a snapshot.
    Failed(ScanError),
}

/// The concurrent discovery engine.
///
/// A `Scanner` is a reusable configuration plus a filesystem handle; each
/// call to [`scan`](Self::scan) or [`spawn`](Self::spawn) is an independent
/// attempt with its own worker pool and cancellation scope.
///
/// # Cloning
///
/// `Scanner` is cheaply cloneable; clones share the filesystem handle.
#[derive(Clone)]
pub struct Scanner {
    config: ScanConfig,
    fs: Arc<dyn PathProbe>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Creates a scanner over the real filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the configuration is invalid.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        Self::with_probe(config, Arc::new(probe::RealFs))
    }

    /// Creates a scanner with a custom filesystem probe.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the configuration is invalid.
    pub fn with_probe(config: ScanConfig, fs: Arc<dyn PathProbe>) -> Result<Self, ScanError> {
        config
            .validate()
            .map_err(|err| ScanError::config(err.to_string()))?;
        Ok(Self { config, fs })
    }

    /// Returns the scanner configuration.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Probes every application and returns the catalog-ordered snapshot.
    ///
    /// Blocks (asynchronously) until the scan finishes, fails, or exceeds
    /// its deadline.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::DeadlineExceeded`] if the attempt outlives the
    /// configured timeout. Per-application probe failures do not fail the
    /// scan; they appear in the snapshot.
    pub async fn scan(&self, catalog: Vec<AppDefinition>) -> Result<ScanSnapshot, ScanError> {
        self.run(catalog, None, &CancellationToken::new()).await
    }

    /// Probes every application, streaming one update per probe.
    ///
    /// The terminal update ([`ScanUpdate::Completed`] or
    /// [`ScanUpdate::Failed`]) always matches the return value. A dropped
    /// receiver does not abort the scan; updates are simply discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Cancelled`] if `cancel` fires before every
    /// application is probed, or [`ScanError::DeadlineExceeded`] on
    /// timeout. Either way all workers have been joined before this
    /// returns.
    pub async fn scan_streaming(
        &self,
        catalog: Vec<AppDefinition>,
        tx: mpsc::Sender<ScanUpdate>,
        cancel: CancellationToken,
    ) -> Result<ScanSnapshot, ScanError> {
        self.run(catalog, Some(&tx), &cancel).await
    }

    async fn run(
        &self,
        catalog: Vec<AppDefinition>,
        tx: Option<&mpsc::Sender<ScanUpdate>>,
        cancel: &CancellationToken,
    ) -> Result<ScanSnapshot, ScanError> {
        let total = catalog.len();
        let timeout = Duration::from_millis(self.config.timeout_ms);
        info!(total, workers = self.config.concurrency, "starting scan");

        if let Some(tx) = tx {
            let _ = tx.send(ScanUpdate::Started { total }).await;
        }

        if total == 0 {
            let snapshot = ScanSnapshot::default();
            if let Some(tx) = tx {
                let _ = tx.send(ScanUpdate::Completed(snapshot.clone())).await;
            }
            return Ok(snapshot);
        }

        // Per-attempt cancellation scope: external stop and the deadline
        // watchdog both fire the same child token, and the flag tells the
        // two apart afterwards.
        let scan_cancel = cancel.child_token();
        let timed_out = Arc::new(AtomicBool::new(false));
        spawn_watchdog(scan_cancel.clone(), Arc::clone(&timed_out), timeout);
        // Stop the watchdog when this attempt unwinds for any reason.
        let _watchdog_guard = scan_cancel.clone().drop_guard();

        // Queue every application up front; capacity == total so sends
        // never block. Enqueueing still respects cancellation.
        let (work_tx, work_rx) = mpsc::channel(total);
        let mut collector = ResultCollector::new(&catalog);
        for app in catalog {
            if scan_cancel.is_cancelled() {
                break;
            }
            if work_tx.send(app).await.is_err() {
                break;
            }
        }
        drop(work_tx);

        let (results_tx, mut results_rx) = mpsc::channel(self.config.channel_capacity);
        let pool = WorkerPool::spawn(
            self.config.concurrency.min(total),
            Arc::clone(&self.fs),
            Arc::new(Mutex::new(work_rx)),
            results_tx,
            scan_cancel.clone(),
        );

        // Drain until the last worker drops its sender. Collector failures
        // are remembered but the pool is always joined first.
        let mut ingest_error: Option<ScanError> = None;
        while let Some(outcome) = results_rx.recv().await {
            if let Some(tx) = tx {
                let _ = tx.send(ScanUpdate::Probed(Box::new(outcome.clone()))).await;
            }
            if ingest_error.is_none() {
                if let Err(err) = collector.ingest(outcome) {
                    warn!(error = %err, "dropping inconsistent outcome");
                    ingest_error = Some(err);
                }
            }
        }
        pool.join().await;

        let result = if scan_cancel.is_cancelled() && !collector.is_complete() {
            debug!(probed = collector.filled(), total, "scan stopped early");
            if timed_out.load(Ordering::SeqCst) {
                Err(ScanError::DeadlineExceeded(timeout))
            } else {
                Err(ScanError::Cancelled)
            }
        } else if let Some(err) = ingest_error {
            Err(err)
        } else {
            collector.finish()
        };

        match &result {
            Ok(snapshot) => {
                info!(
                    total = snapshot.len(),
                    ready = snapshot.ready_count(),
                    errors = snapshot.error_count(),
                    "scan completed"
                );
                if let Some(tx) = tx {
                    let _ = tx.send(ScanUpdate::Completed(snapshot.clone())).await;
                }
            }
            Err(err) => {
                warn!(error = %err, "scan failed");
                if let Some(tx) = tx {
                    let _ = tx.send(ScanUpdate::Failed(err.clone())).await;
                }
            }
        }

        result
    }
}

/// Fires the scan token when the deadline passes.
///
/// The watchdog itself exits as soon as the token fires for any reason, so
/// a finished scan does not leave a sleeping task behind.
fn spawn_watchdog(cancel: CancellationToken, timed_out: Arc<AtomicBool>, timeout: Duration) {
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => {}
            () = tokio::time::sleep(timeout) => {
                debug!(?timeout, "scan deadline exceeded");
                timed_out.store(true, Ordering::SeqCst);
                cancel.cancel();
            }
        }
    });
}
