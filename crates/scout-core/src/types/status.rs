//! Per-application configuration status.

use serde::{Deserialize, Serialize};

/// The configuration status of one application, as shown to the UI.
///
/// Derived deterministically from a single probe outcome.
///
/// # Examples
///
/// ```
/// use scout_core::ConfigStatus;
///
/// let status = ConfigStatus::Ready;
/// assert!(status.is_ready());
/// assert_eq!(status.label(), "Ready");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ConfigStatus {
    /// A config file exists at one of the candidate paths.
    Ready,

    /// All candidate paths were checked and none exist.
    ///
    /// Absence is a normal answer, not a failure.
    #[default]
    NotConfigured,

    /// The probe itself failed (e.g. permission denied).
    ///
    /// Distinct from "not found": the application's status is unknown.
    Error,
}

impl ConfigStatus {
    /// Returns `true` if a config file was found.
    #[inline]
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Returns `true` if the probe failed for this application.
    #[inline]
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns a human-readable label for this status.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::NotConfigured => "Not Configured",
            Self::Error => "Error",
        }
    }

    /// Returns a single-character marker for compact listings.
    #[inline]
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Ready => "●",
            Self::NotConfigured => "○",
            Self::Error => "✗",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_status_predicates() {
        assert!(ConfigStatus::Ready.is_ready());
        assert!(!ConfigStatus::NotConfigured.is_ready());
        assert!(!ConfigStatus::Error.is_ready());

        assert!(ConfigStatus::Error.is_error());
        assert!(!ConfigStatus::Ready.is_error());
    }

    #[test]
    fn test_config_status_labels() {
        assert_eq!(ConfigStatus::Ready.label(), "Ready");
        assert_eq!(ConfigStatus::NotConfigured.label(), "Not Configured");
        assert_eq!(ConfigStatus::Error.label(), "Error");
    }

    #[test]
    fn test_config_status_default() {
        assert_eq!(ConfigStatus::default(), ConfigStatus::NotConfigured);
    }

    #[test]
    fn test_config_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ConfigStatus::Ready).unwrap(),
            r#""ready""#
        );
        assert_eq!(
            serde_json::to_string(&ConfigStatus::NotConfigured).unwrap(),
            r#""not_configured""#
        );
        assert_eq!(
            serde_json::to_string(&ConfigStatus::Error).unwrap(),
            r#""error""#
        );
    }

    #[test]
    fn test_config_status_deserialization() {
        let status: ConfigStatus = serde_json::from_str(r#""ready""#).unwrap();
        assert_eq!(status, ConfigStatus::Ready);
    }
}
