//! Background scan attempts with observable state.
//!
//! [`Scanner::spawn`] runs a scan on the runtime and returns a
//! [`ScanHandle`]: a one-attempt view over the scan's state machine with
//! idempotent stop. Dropping the handle cancels the attempt.

use scout_core::{AppDefinition, ScanSnapshot};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::warn;

use crate::state::{ScanState, ScanStateMachine};
use crate::{ScanUpdate, Scanner};

/// A handle to one background scan attempt.
///
/// Each attempt gets a fresh handle; state does not carry over between
/// attempts. The handle is the only way to stop or observe the attempt it
/// belongs to.
#[derive(Debug)]
pub struct ScanHandle {
    state_rx: watch::Receiver<ScanState>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl ScanHandle {
    /// Requests cancellation of this attempt.
    ///
    /// Idempotent: repeated calls, and calls after the scan already reached
    /// a terminal state, are no-ops.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn current_state(&self) -> ScanState {
        self.state_rx.borrow().clone()
    }

    /// Returns the snapshot if the attempt has completed.
    #[must_use]
    pub fn snapshot(&self) -> Option<ScanSnapshot> {
        self.state_rx.borrow().snapshot().cloned()
    }

    /// Returns a receiver that observes every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScanState> {
        self.state_rx.clone()
    }

    /// Waits until the attempt reaches a terminal state and returns it.
    pub async fn wait(&mut self) -> ScanState {
        loop {
            let state = self.state_rx.borrow().clone();
            if state.is_terminal() {
                return state;
            }
            if self.state_rx.changed().await.is_err() {
                // Driver gone without a terminal state; report what we saw.
                return self.state_rx.borrow().clone();
            }
        }
    }
}

impl Scanner {
    /// Starts a scan in the background and returns its handle.
    ///
    /// The attempt moves through `Idle -> Scanning -> Complete | Failed`,
    /// observable via [`ScanHandle::subscribe`]. Dropping the handle
    /// cancels the attempt.
    #[must_use]
    pub fn spawn(&self, catalog: Vec<AppDefinition>) -> ScanHandle {
        let (machine, state_rx) = ScanStateMachine::new();
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::channel(self.config().channel_capacity);

        let engine = self.clone();
        let engine_cancel = cancel.clone();
        tokio::spawn(async move {
            // The driver consumes the terminal update; the return value is
            // redundant here.
            let _ = engine.scan_streaming(catalog, tx, engine_cancel).await;
        });
        tokio::spawn(drive_state(machine, rx));

        ScanHandle {
            state_rx,
            cancel: cancel.clone(),
            _guard: cancel.drop_guard(),
        }
    }
}

/// Folds streaming updates into state machine transitions.
async fn drive_state(mut machine: ScanStateMachine, mut rx: mpsc::Receiver<ScanUpdate>) {
    let mut probed = 0;
    while let Some(update) = rx.recv().await {
        let transition = match update {
            ScanUpdate::Started { total } => machine.start(total),
            ScanUpdate::Probed(_) => {
                probed += 1;
                machine.progress(probed)
            }
            ScanUpdate::Completed(snapshot) => machine.complete(snapshot),
            ScanUpdate::Failed(error) => machine.fail(error),
        };
        if let Err(err) = transition {
            warn!(error = %err, "scan update arrived out of order");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::PathProbe;
    use crate::ScanError;
    use camino::Utf8Path;
    use scout_core::ScanConfig;
    use std::io;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug)]
    struct SlowEmptyFs(Duration);

    impl PathProbe for SlowEmptyFs {
        fn path_exists(&self, _path: &Utf8Path) -> io::Result<bool> {
            std::thread::sleep(self.0);
            Ok(false)
        }
    }

    fn catalog(n: usize) -> Vec<AppDefinition> {
        (0..n)
            .map(|i| AppDefinition::new(format!("app-{i}"), "", &["/none"]))
            .collect()
    }

    fn scanner(delay_ms: u64) -> Scanner {
        Scanner::with_probe(
            ScanConfig::default(),
            Arc::new(SlowEmptyFs(Duration::from_millis(delay_ms))),
        )
        .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_handle_reaches_complete() {
        let mut handle = scanner(1).spawn(catalog(10));
        let state = handle.wait().await;

        let snapshot = state.snapshot().expect("scan should complete");
        assert_eq!(snapshot.len(), 10);
        assert_eq!(handle.snapshot().map(|s| s.len()), Some(10));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_stop_is_idempotent() {
        let mut handle = scanner(10).spawn(catalog(500));
        handle.stop();
        handle.stop();

        let state = handle.wait().await;
        assert_eq!(state, ScanState::Failed(ScanError::Cancelled));
        assert!(handle.snapshot().is_none());

        // Stopping after the terminal state is a no-op.
        handle.stop();
        assert_eq!(handle.wait().await, ScanState::Failed(ScanError::Cancelled));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_subscriber_observes_progress() {
        let mut handle = scanner(1).spawn(catalog(5));
        let mut rx = handle.subscribe();

        let mut saw_scanning = false;
        loop {
            let state = rx.borrow_and_update().clone();
            if matches!(state, ScanState::Scanning { .. }) {
                saw_scanning = true;
            }
            if state.is_terminal() {
                break;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
        assert!(saw_scanning);
        assert!(handle.wait().await.is_terminal());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_dropping_handle_cancels_scan() {
        let handle = scanner(10).spawn(catalog(500));
        let mut rx = handle.subscribe();
        drop(handle);

        // The attempt must terminate promptly rather than probing all 500
        // definitions.
        let reached_terminal = tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if rx.borrow_and_update().is_terminal() {
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;
        assert!(
            reached_terminal.is_ok(),
            "scan did not stop after handle drop"
        );
        assert_eq!(*rx.borrow(), ScanState::Failed(ScanError::Cancelled));
    }
}
