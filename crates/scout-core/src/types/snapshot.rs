//! The terminal aggregate of one scan attempt.

use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

use super::outcome::AppStatus;
use super::status::ConfigStatus;

/// The complete result of one scan attempt.
///
/// `results` holds exactly one entry per catalog application, in catalog
/// order regardless of probe completion order. Once published a snapshot
/// never changes; a re-scan produces a new one.
///
/// # Examples
///
/// ```
/// use scout_core::ScanSnapshot;
///
/// let snapshot = ScanSnapshot::default();
/// assert!(snapshot.is_empty());
/// assert_eq!(snapshot.ready_count(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSnapshot {
    /// One status per catalog application, in catalog order.
    pub results: Vec<AppStatus>,

    /// Probe failures, keyed by application name.
    ///
    /// Every entry here corresponds to a result with status
    /// [`ConfigStatus::Error`].
    pub errors: Vec<(String, ProbeError)>,
}

impl ScanSnapshot {
    /// Returns the number of applications covered by this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if the snapshot covers no applications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the number of applications with a config file present.
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.results
            .iter()
            .filter(|status| status.status.is_ready())
            .count()
    }

    /// Returns the number of applications whose probe failed.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns statuses matching the given status, preserving catalog order.
    pub fn with_status(&self, status: ConfigStatus) -> impl Iterator<Item = &AppStatus> {
        self.results.iter().filter(move |entry| entry.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AppDefinition, ProbeOutcome};
    use camino::Utf8PathBuf;
    use std::io;

    fn snapshot() -> ScanSnapshot {
        let found = ProbeOutcome::found(
            AppDefinition::new("git", "🌳", &["~/.gitconfig"]),
            Utf8PathBuf::from("/home/me/.gitconfig"),
        );
        let absent = ProbeOutcome::absent(AppDefinition::new("zed", "⚡", &[]));
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error = ProbeError::access("/etc/fish", &io_err);
        let failed = ProbeOutcome::failed(
            AppDefinition::new("fish", "🐟", &["/etc/fish"]),
            error.clone(),
        );

        ScanSnapshot {
            results: vec![found.into(), absent.into(), failed.into()],
            errors: vec![("fish".to_owned(), error)],
        }
    }

    #[test]
    fn test_snapshot_counts() {
        let snapshot = snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.ready_count(), 1);
        assert_eq!(snapshot.error_count(), 1);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_snapshot_with_status() {
        let snapshot = snapshot();
        let ready: Vec<_> = snapshot.with_status(ConfigStatus::Ready).collect();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].name, "git");

        let errored: Vec<_> = snapshot.with_status(ConfigStatus::Error).collect();
        assert_eq!(errored.len(), 1);
        assert_eq!(errored[0].name, "fish");
    }

    #[test]
    fn test_snapshot_serialization_roundtrip() {
        let snapshot = snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: ScanSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }
}
