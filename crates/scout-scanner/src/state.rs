//! Observable scan lifecycle state.
//!
//! The scan lifecycle is a small state machine published through a
//! [`watch`] channel so any number of observers can follow progress without
//! polling the engine. Illegal transitions are rejected and leave the
//! current state untouched.

use scout_core::ScanSnapshot;
use tokio::sync::watch;

use crate::error::{ScanError, StateError};

/// The lifecycle state of a scan attempt.
///
/// ```text
/// Idle ──start──▶ Scanning ──complete──▶ Complete
///   ▲                │                       │
///   │                └──fail──▶ Failed       │
///   └───────────────reset────────┴───────────┘
/// ```
///
/// `Scanning` carries monotonic progress; `Complete` and `Failed` are
/// terminal until an explicit reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    /// No scan is running and no results are held.
    #[default]
    Idle,

    /// A scan is in flight.
    Scanning {
        /// Number of applications probed so far.
        current: usize,
        /// Total number of applications in this attempt.
        total: usize,
    },

    /// The scan finished and produced a snapshot.
    Complete(ScanSnapshot),

    /// The scan terminated without a snapshot.
    Failed(ScanError),
}

impl ScanState {
    /// Returns a short lowercase name for this state.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning { .. } => "scanning",
            Self::Complete(_) => "complete",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns `true` for `Complete` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Failed(_))
    }

    /// Returns the snapshot if the scan completed.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&ScanSnapshot> {
        match self {
            Self::Complete(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// State machine with observable transitions.
///
/// Every accepted transition is published to subscribers; rejected
/// transitions publish nothing.
#[derive(Debug)]
pub(crate) struct ScanStateMachine {
    state: ScanState,
    tx: watch::Sender<ScanState>,
}

impl ScanStateMachine {
    /// Creates a machine in `Idle` plus a receiver for observers.
    pub(crate) fn new() -> (Self, watch::Receiver<ScanState>) {
        let (tx, rx) = watch::channel(ScanState::Idle);
        (
            Self {
                state: ScanState::Idle,
                tx,
            },
            rx,
        )
    }

    /// Enters `Scanning` with zero progress. Legal only from `Idle`.
    pub(crate) fn start(&mut self, total: usize) -> Result<(), StateError> {
        match self.state {
            ScanState::Idle => {
                self.publish(ScanState::Scanning { current: 0, total });
                Ok(())
            }
            _ => Err(StateError::new(self.state.name(), "scanning")),
        }
    }

    /// Updates progress. Legal only while `Scanning`, and only forward.
    pub(crate) fn progress(&mut self, current: usize) -> Result<(), StateError> {
        match self.state {
            ScanState::Scanning {
                current: previous,
                total,
            } if current >= previous => {
                self.publish(ScanState::Scanning { current, total });
                Ok(())
            }
            _ => Err(StateError::new(self.state.name(), "scanning")),
        }
    }

    /// Enters `Complete`. Legal only from `Scanning`.
    pub(crate) fn complete(&mut self, snapshot: ScanSnapshot) -> Result<(), StateError> {
        match self.state {
            ScanState::Scanning { .. } => {
                self.publish(ScanState::Complete(snapshot));
                Ok(())
            }
            _ => Err(StateError::new(self.state.name(), "complete")),
        }
    }

    /// Enters `Failed`. Legal only from `Scanning`.
    pub(crate) fn fail(&mut self, error: ScanError) -> Result<(), StateError> {
        match self.state {
            ScanState::Scanning { .. } => {
                self.publish(ScanState::Failed(error));
                Ok(())
            }
            _ => Err(StateError::new(self.state.name(), "failed")),
        }
    }

    /// Returns to `Idle`, discarding any held snapshot or error.
    ///
    /// Legal from the terminal states; resetting an already idle machine is
    /// a no-op rather than an error.
    pub(crate) fn reset(&mut self) -> Result<(), StateError> {
        match self.state {
            ScanState::Idle => Ok(()),
            ScanState::Complete(_) | ScanState::Failed(_) => {
                self.publish(ScanState::Idle);
                Ok(())
            }
            ScanState::Scanning { .. } => Err(StateError::new("scanning", "idle")),
        }
    }

    /// Returns the current state.
    #[cfg(test)]
    pub(crate) const fn state(&self) -> &ScanState {
        &self.state
    }

    fn publish(&mut self, next: ScanState) {
        self.state = next.clone();
        // send_replace never fails, even with no receivers left.
        let _previous = self.tx.send_replace(next);
    }
}
