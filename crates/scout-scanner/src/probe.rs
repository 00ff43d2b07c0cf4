//! Filesystem probing for a single application.
//!
//! A probe checks an application's candidate config paths in priority order
//! and reports the first one that exists. Probes are pure with respect to
//! the engine: they never panic and never mutate shared state.

use std::io;

use camino::Utf8Path;
use scout_core::{AppDefinition, ProbeError, ProbeOutcome};
use tracing::debug;

/// Filesystem existence checks, abstracted for testing.
///
/// The engine only ever asks one question of the filesystem: does a regular
/// file exist at this path? Implementations must be safe to call from
/// blocking worker context.
pub trait PathProbe: Send + Sync + 'static {
    /// Returns `true` if a regular file exists at `path`.
    ///
    /// Directories and other non-file entries do not count as a config
    /// file. "Does not exist" is `Ok(false)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the path cannot be checked at
    /// all (e.g. permission denied on a parent directory).
    fn path_exists(&self, path: &Utf8Path) -> io::Result<bool>;
}

/// [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl PathProbe for RealFs {
    fn path_exists(&self, path: &Utf8Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Probes all candidate paths for one application.
///
/// Candidates are checked in catalog order; the first existing path wins
/// and the remaining candidates are skipped. If no candidate exists but at
/// least one check failed, the outcome carries the first failure, since the
/// application's true status is unknown.
///
/// This function never panics and never returns early with an error: every
/// call produces exactly one [`ProbeOutcome`].
#[must_use]
pub fn probe_app(fs: &dyn PathProbe, app: &AppDefinition) -> ProbeOutcome {
    let mut first_error: Option<ProbeError> = None;

    for path in &app.config_paths {
        match fs.path_exists(path) {
            Ok(true) => {
                debug!(app = %app.name, path = %path, "config found");
                return ProbeOutcome::found(app.clone(), path.clone());
            }
            Ok(false) => {}
            Err(err) => {
                debug!(app = %app.name, path = %path, error = %err, "probe failed");
                if first_error.is_none() {
                    first_error = Some(ProbeError::access(path.clone(), &err));
                }
            }
        }
    }

    match first_error {
        Some(error) => ProbeOutcome::failed(app.clone(), error),
        None => ProbeOutcome::absent(app.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::ConfigStatus;
    use std::io::Write;

    /// Probe stub mapping paths to fixed answers; unknown paths don't exist.
    struct FakeFs {
        existing: Vec<&'static str>,
        failing: Vec<&'static str>,
    }

    impl PathProbe for FakeFs {
        fn path_exists(&self, path: &Utf8Path) -> io::Result<bool> {
            if self.failing.contains(&path.as_str()) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            Ok(self.existing.contains(&path.as_str()))
        }
    }

    #[test]
    fn test_probe_first_existing_path_wins() {
        let fs = FakeFs {
            existing: vec!["/y", "/z"],
            failing: vec![],
        };
        let app = AppDefinition::new("demo", "", &["/x", "/y", "/z"]);

        let outcome = probe_app(&fs, &app);
        assert!(outcome.config_exists);
        assert_eq!(outcome.config_path.as_deref().map(Utf8Path::as_str), Some("/y"));
    }

    #[test]
    fn test_probe_no_paths_exist() {
        let fs = FakeFs {
            existing: vec![],
            failing: vec![],
        };
        let app = AppDefinition::new("demo", "", &["/x", "/y"]);

        let outcome = probe_app(&fs, &app);
        assert!(!outcome.config_exists);
        assert!(outcome.config_path.is_none());
        assert!(outcome.error.is_none());
        assert_eq!(outcome.status(), ConfigStatus::NotConfigured);
    }

    #[test]
    fn test_probe_empty_candidate_list() {
        let fs = FakeFs {
            existing: vec![],
            failing: vec![],
        };
        let app = AppDefinition::new("demo", "", &[]);

        let outcome = probe_app(&fs, &app);
        assert_eq!(outcome.status(), ConfigStatus::NotConfigured);
    }

    #[test]
    fn test_probe_later_hit_beats_earlier_failure() {
        let fs = FakeFs {
            existing: vec!["/y"],
            failing: vec!["/x"],
        };
        let app = AppDefinition::new("demo", "", &["/x", "/y"]);

        let outcome = probe_app(&fs, &app);
        assert!(outcome.config_exists);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_probe_all_failures_reports_first() {
        let fs = FakeFs {
            existing: vec![],
            failing: vec!["/x", "/y"],
        };
        let app = AppDefinition::new("demo", "", &["/x", "/y"]);

        let outcome = probe_app(&fs, &app);
        assert_eq!(outcome.status(), ConfigStatus::Error);
        let error = outcome.error.unwrap();
        assert_eq!(error.path().map(|p| p.as_str()), Some("/x"));
    }

    #[test]
    fn test_real_fs_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&file_path).unwrap();
        writeln!(file, "key = true").unwrap();

        let utf8 = Utf8Path::from_path(&file_path).unwrap();
        assert!(RealFs.path_exists(utf8).unwrap());
    }

    #[test]
    fn test_real_fs_missing_is_ok_false() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let utf8 = Utf8Path::from_path(&missing).unwrap();
        assert!(!RealFs.path_exists(utf8).unwrap());
    }

    #[test]
    fn test_real_fs_directory_is_not_a_config() {
        let dir = tempfile::tempdir().unwrap();
        let utf8 = Utf8Path::from_path(dir.path()).unwrap();
        assert!(!RealFs.path_exists(utf8).unwrap());
    }
}
