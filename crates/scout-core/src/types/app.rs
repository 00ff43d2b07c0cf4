//! Application catalog entries.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A known application in the catalog.
///
/// Definitions are supplied by the catalog and are immutable for the
/// duration of a scan. The `config_paths` list is ordered by priority:
/// the first path that exists on disk wins.
///
/// # Examples
///
/// ```
/// use scout_core::AppDefinition;
///
/// let app = AppDefinition::new("ghostty", "👻", &["~/.config/ghostty/config"]);
/// assert_eq!(app.name, "ghostty");
/// assert_eq!(app.config_paths.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDefinition {
    /// Unique identifier (e.g. `ghostty`).
    pub name: String,

    /// Human-readable name for display (e.g. `Ghostty`).
    #[serde(default)]
    pub display_name: String,

    /// Display glyph. Opaque to the engine.
    #[serde(default)]
    pub icon: String,

    /// Category for grouping in listings (e.g. `terminal`, `editor`).
    #[serde(default)]
    pub category: String,

    /// Candidate config file locations, in priority order.
    ///
    /// Entries may be `~/`-relative; the catalog expands them before the
    /// scanner sees them.
    pub config_paths: SmallVec<[Utf8PathBuf; 4]>,
}

impl AppDefinition {
    /// Creates a definition with the given name, icon, and candidate paths.
    ///
    /// Mostly useful in tests; production definitions come from the catalog.
    #[must_use]
    pub fn new(name: impl Into<String>, icon: impl Into<String>, paths: &[&str]) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            icon: icon.into(),
            category: String::new(),
            config_paths: paths.iter().map(Utf8PathBuf::from).collect(),
        }
    }

    /// Returns the name to show in user-facing output.
    ///
    /// Falls back to the identifier when no display name is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}
