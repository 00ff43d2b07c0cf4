//! Probe outcomes and their UI-facing aggregation.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::ProbeError;

use super::app::AppDefinition;
use super::status::ConfigStatus;

/// The raw result of probing one application's candidate paths.
///
/// Produced exactly once per application by exactly one worker, and never
/// mutated after creation. `error` being `Some` means the probe itself
/// failed, which is distinct from "no config found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// The definition this outcome corresponds to.
    pub app: AppDefinition,

    /// Whether a config file exists at one of the candidate paths.
    pub config_exists: bool,

    /// The winning candidate path, if any.
    pub config_path: Option<Utf8PathBuf>,

    /// The probe failure, if the check itself went wrong.
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    /// Creates an outcome for an application whose config was found.
    #[must_use]
    pub fn found(app: AppDefinition, path: Utf8PathBuf) -> Self {
        Self {
            app,
            config_exists: true,
            config_path: Some(path),
            error: None,
        }
    }

    /// Creates an outcome for an application with no config present.
    #[must_use]
    pub const fn absent(app: AppDefinition) -> Self {
        Self {
            app,
            config_exists: false,
            config_path: None,
            error: None,
        }
    }

    /// Creates an outcome for a probe that failed.
    #[must_use]
    pub const fn failed(app: AppDefinition, error: ProbeError) -> Self {
        Self {
            app,
            config_exists: false,
            config_path: None,
            error: Some(error),
        }
    }

    /// Derives the UI-facing status for this outcome.
    ///
    /// A probe error wins over everything else; otherwise the status follows
    /// `config_exists`.
    #[must_use]
    pub fn status(&self) -> ConfigStatus {
        if self.error.is_some() {
            ConfigStatus::Error
        } else if self.config_exists {
            ConfigStatus::Ready
        } else {
            ConfigStatus::NotConfigured
        }
    }
}

/// The aggregated, UI-facing status of one application.
///
/// Derived deterministically from exactly one [`ProbeOutcome`].
/// `config_path` is `Some` only when the status is
/// [`ConfigStatus::Ready`].
///
/// # Examples
///
/// ```
/// use scout_core::{AppDefinition, AppStatus, ConfigStatus, ProbeOutcome};
/// use camino::Utf8PathBuf;
///
/// let app = AppDefinition::new("tmux", "🔲", &["~/.tmux.conf"]);
/// let outcome = ProbeOutcome::found(app, Utf8PathBuf::from("/home/me/.tmux.conf"));
/// let status = AppStatus::from(outcome);
/// assert_eq!(status.status, ConfigStatus::Ready);
/// assert!(status.config_path.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStatus {
    /// Application identifier, copied from the definition.
    pub name: String,

    /// Display name, copied from the definition.
    pub display_name: String,

    /// Display glyph, copied from the definition.
    pub icon: String,

    /// Category, copied from the definition.
    pub category: String,

    /// The aggregated status.
    pub status: ConfigStatus,

    /// The winning config path; `Some` only when `status` is `Ready`.
    pub config_path: Option<Utf8PathBuf>,
}

impl From<ProbeOutcome> for AppStatus {
    fn from(outcome: ProbeOutcome) -> Self {
        let status = outcome.status();
        let config_path = if status.is_ready() {
            outcome.config_path
        } else {
            None
        };

        Self {
            name: outcome.app.name,
            display_name: outcome.app.display_name,
            icon: outcome.app.icon,
            category: outcome.app.category,
            status,
            config_path,
        }
    }
}

impl AppStatus {
    /// Returns the name to show in user-facing output.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn app() -> AppDefinition {
        AppDefinition::new("alacritty", "🖥", &["~/.config/alacritty/alacritty.toml"])
    }

    #[test]
    fn test_outcome_found_status() {
        let outcome = ProbeOutcome::found(app(), Utf8PathBuf::from("/tmp/alacritty.toml"));
        assert_eq!(outcome.status(), ConfigStatus::Ready);
        assert!(outcome.config_exists);
    }

    #[test]
    fn test_outcome_absent_status() {
        let outcome = ProbeOutcome::absent(app());
        assert_eq!(outcome.status(), ConfigStatus::NotConfigured);
        assert!(outcome.config_path.is_none());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_outcome_failed_status() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let outcome = ProbeOutcome::failed(app(), ProbeError::access("/x", &io_err));
        assert_eq!(outcome.status(), ConfigStatus::Error);
        assert!(!outcome.config_exists);
    }

    #[test]
    fn test_app_status_copies_definition_fields() {
        let outcome = ProbeOutcome::absent(app());
        let status = AppStatus::from(outcome);
        assert_eq!(status.name, "alacritty");
        assert_eq!(status.icon, "🖥");
        assert_eq!(status.status, ConfigStatus::NotConfigured);
        assert!(status.config_path.is_none());
    }

    #[test]
    fn test_app_status_path_only_when_ready() {
        // A failed probe may still carry a path internally; the aggregate
        // must not expose it.
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let mut outcome = ProbeOutcome::failed(app(), ProbeError::access("/x", &io_err));
        outcome.config_path = Some(Utf8PathBuf::from("/x"));

        let status = AppStatus::from(outcome);
        assert_eq!(status.status, ConfigStatus::Error);
        assert!(status.config_path.is_none());
    }
}
