//! Error types for the scout-scanner crate.
//!
//! This module provides [`ScanError`] for failed scan attempts,
//! [`StateError`] for illegal state machine transitions, and
//! [`CatalogError`] for catalog loading problems.

use std::time::Duration;

use camino::Utf8PathBuf;

/// Errors that terminate a scan attempt.
///
/// Per-application probe failures are NOT scan errors: they are recorded in
/// the snapshot and the scan completes normally. A `ScanError` means the
/// attempt as a whole produced no snapshot.
///
/// The type is `Clone` because a failed attempt is published through the
/// observable state channel as well as returned to the caller.
///
/// # Examples
///
/// ```
/// use scout_scanner::ScanError;
///
/// let err = ScanError::Cancelled;
/// assert!(err.is_cancelled());
/// assert!(!err.is_deadline());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The scan was stopped before all applications were probed.
    #[error("scan cancelled before completion")]
    Cancelled,

    /// The scan exceeded its overall deadline.
    #[error("scan deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// The application catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The collector received results that contradict the catalog.
    ///
    /// Indicates a bug in the engine (duplicate or unknown application),
    /// not a user-visible condition.
    #[error("inconsistent scan results: {0}")]
    Inconsistent(String),

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Creates a new [`ScanError::Catalog`] error.
    #[inline]
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Creates a new [`ScanError::Inconsistent`] error.
    #[inline]
    pub fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent(message.into())
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if the scan was cancelled by the caller.
    #[inline]
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if the scan timed out.
    #[inline]
    #[must_use]
    pub const fn is_deadline(&self) -> bool {
        matches!(self, Self::DeadlineExceeded(_))
    }
}

impl From<CatalogError> for ScanError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err.to_string())
    }
}

/// An illegal scan state machine transition.
///
/// The variant names the state the machine was in and the state the caller
/// tried to move to. The machine stays in its previous state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scan state transition: {from} -> {to}")]
pub struct StateError {
    /// The state the machine was in.
    pub from: &'static str,
    /// The state the caller tried to enter.
    pub to: &'static str,
}

impl StateError {
    pub(crate) const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }
}

/// Errors that can occur while loading the application catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read a catalog file.
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A catalog entry is unusable.
    #[error("invalid catalog entry {name}: {reason}")]
    InvalidEntry {
        /// The application name.
        name: String,
        /// What is wrong with the entry.
        reason: String,
    },
}

impl CatalogError {
    /// Creates a new [`CatalogError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`CatalogError::InvalidEntry`] error.
    #[inline]
    pub fn invalid_entry(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_scan_error_predicates() {
        assert!(ScanError::Cancelled.is_cancelled());
        assert!(!ScanError::Cancelled.is_deadline());

        let deadline = ScanError::DeadlineExceeded(Duration::from_secs(10));
        assert!(deadline.is_deadline());
        assert!(!deadline.is_cancelled());
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::config("concurrency must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: concurrency must be at least 1"
        );
    }

    #[test]
    fn test_scan_error_from_catalog_error() {
        let catalog_err = CatalogError::invalid_entry("ghostty", "no config paths");
        let err = ScanError::from(catalog_err);
        assert!(matches!(err, ScanError::Catalog(_)));
        assert!(err.to_string().contains("ghostty"));
    }

    #[test]
    fn test_state_error_display() {
        let err = StateError::new("idle", "complete");
        assert_eq!(
            err.to_string(),
            "invalid scan state transition: idle -> complete"
        );
    }

    #[test]
    fn test_catalog_error_read() {
        let err = CatalogError::read(
            "~/.config/appscout/apps.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("apps.json"));
    }
}
