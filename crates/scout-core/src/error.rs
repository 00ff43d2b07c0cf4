//! Error types for the scout-core crate.
//!
//! This module provides [`ConfigError`] for configuration-related failures
//! and [`ProbeError`] for per-application probe failures.

use std::io;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
///
/// This error type covers all configuration-related failures including
/// path validation, invalid option values, and parsing errors.
///
/// # Examples
///
/// ```
/// use scout_core::ConfigError;
///
/// let error = ConfigError::invalid_option("concurrency", "must be at least 1");
/// assert!(error.to_string().contains("concurrency"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A configuration option has an invalid value.
    #[error("invalid configuration option '{option}': {reason}")]
    InvalidOption {
        /// The name of the invalid option.
        option: String,
        /// Explanation of why the option is invalid.
        reason: String,
    },

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Creates a new [`ConfigError::InvalidOption`] error.
    #[inline]
    pub fn invalid_option(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ConfigError::InvalidPath`] error.
    #[inline]
    pub fn invalid_path(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// An error produced while probing a single application's candidate paths.
///
/// Probe errors are non-fatal: one failing application never aborts a scan.
/// They are recorded on the [`ProbeOutcome`](crate::ProbeOutcome) and folded
/// into the snapshot's error list, surfacing as
/// [`ConfigStatus::Error`](crate::ConfigStatus::Error) for that application.
///
/// Unlike a raw [`std::io::Error`], this type is `Clone` and serializable so
/// outcomes can be published to observers as immutable copies.
///
/// # Examples
///
/// ```
/// use std::io;
/// use camino::Utf8PathBuf;
/// use scout_core::ProbeError;
///
/// let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
/// let err = ProbeError::access(Utf8PathBuf::from("/etc/app/config"), &io_err);
/// assert!(err.to_string().contains("/etc/app/config"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ProbeError {
    /// A candidate path could not be checked.
    ///
    /// Covers permission errors, broken mounts, and any other I/O failure
    /// that is distinct from "the path does not exist".
    #[error("cannot access {path}: {message}")]
    Access {
        /// The candidate path that failed.
        path: Utf8PathBuf,
        /// The I/O error kind, as reported by the filesystem.
        kind: String,
        /// Human-readable error message.
        message: String,
    },

    /// The probe task itself failed to run to completion.
    ///
    /// Probes must never panic by contract; if one does, the failure is
    /// captured here instead of propagating.
    #[error("probe aborted: {0}")]
    Aborted(String),
}

impl ProbeError {
    /// Creates a new [`ProbeError::Access`] from an I/O error.
    #[inline]
    pub fn access(path: impl Into<Utf8PathBuf>, source: &io::Error) -> Self {
        Self::Access {
            path: path.into(),
            kind: source.kind().to_string(),
            message: source.to_string(),
        }
    }

    /// Creates a new [`ProbeError::Aborted`] error.
    #[inline]
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::Aborted(reason.into())
    }

    /// Returns the candidate path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Access { path, .. } => Some(path),
            Self::Aborted(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_option_display() {
        let error = ConfigError::invalid_option("concurrency", "must be at least 1");
        let msg = error.to_string();
        assert!(msg.contains("concurrency"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn test_invalid_path_display() {
        let error = ConfigError::invalid_path("/bad/path", "not a file");
        let msg = error.to_string();
        assert!(msg.contains("/bad/path"));
        assert!(msg.contains("not a file"));
    }

    #[test]
    fn test_probe_error_access() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ProbeError::access("/etc/app/config", &io_err);
        assert_eq!(
            err.path().map(|p| p.as_str()),
            Some("/etc/app/config")
        );
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_probe_error_aborted() {
        let err = ProbeError::aborted("task cancelled");
        assert!(err.path().is_none());
        assert!(err.to_string().contains("task cancelled"));
    }

    #[test]
    fn test_probe_error_roundtrip() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = ProbeError::access("/x", &io_err);
        let json = serde_json::to_string(&err).unwrap();
        let parsed: ProbeError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}
