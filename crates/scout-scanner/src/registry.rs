//! The application catalog.
//!
//! The catalog ships embedded in the binary and can be extended (or
//! entries overridden) by a user file at `~/.config/appscout/apps.json`.
//! Merging keeps embedded order: an override replaces the entry in place,
//! new applications are appended in file order.

use camino::{Utf8Path, Utf8PathBuf};
use scout_core::{expand_tilde, AppDefinition, CatalogConfig, FxHashMap};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::CatalogError;

/// Catalog JSON as shipped in the binary.
const EMBEDDED_CATALOG: &str = include_str!("../assets/apps.json");

/// Relative location of the user catalog under the home directory.
const USER_CATALOG_PATH: &str = ".config/appscout/apps.json";

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    applications: Vec<AppDefinition>,
}

/// An ordered collection of known applications.
///
/// The catalog defines the identity and ordering of a scan: snapshots list
/// one result per catalog entry, in catalog order. Lookup by name is
/// constant-time via an internal index.
///
/// # Examples
///
/// ```
/// use scout_scanner::AppCatalog;
///
/// let catalog = AppCatalog::embedded().unwrap();
/// assert!(catalog.get("ghostty").is_some());
/// assert!(!catalog.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AppCatalog {
    apps: Vec<AppDefinition>,
    index: FxHashMap<String, usize>,
}

impl AppCatalog {
    /// Loads the catalog shipped in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the embedded JSON is malformed,
    /// which indicates a broken build.
    pub fn embedded() -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(EMBEDDED_CATALOG)?;
        Self::from_definitions(file.applications)
    }

    /// Loads the embedded catalog and merges the user catalog per `config`.
    ///
    /// A missing user file is not an error; a malformed one is logged and
    /// skipped, keeping the embedded catalog usable.
    ///
    /// # Errors
    ///
    /// Returns an error only if the embedded catalog itself is unusable.
    pub fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::embedded()?;

        if !config.use_user_catalog {
            return Ok(catalog);
        }

        let user_path = config
            .user_catalog
            .clone()
            .or_else(default_user_catalog_path);

        if let Some(path) = user_path {
            match catalog.merge_file(&path) {
                Ok(merged) if merged > 0 => {
                    info!(path = %path, apps = merged, "merged user catalog");
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(path = %path, error = %err, "skipping unusable user catalog");
                }
            }
        }

        Ok(catalog)
    }

    /// Builds a catalog from a list of definitions.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidEntry`] on an empty name or a
    /// duplicate name.
    pub fn from_definitions(apps: Vec<AppDefinition>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();
        for (i, app) in apps.iter().enumerate() {
            if app.name.is_empty() {
                return Err(CatalogError::invalid_entry(
                    format!("#{i}"),
                    "application name is empty",
                ));
            }
            if index.insert(app.name.clone(), i).is_some() {
                return Err(CatalogError::invalid_entry(
                    app.name.clone(),
                    "duplicate application name",
                ));
            }
        }

        Ok(Self { apps, index })
    }

    /// Merges definitions from a user catalog file.
    ///
    /// Entries whose name matches an existing application replace it in
    /// place; new entries are appended. Returns the number of definitions
    /// taken from the file. A missing file merges nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Read`] or [`CatalogError::Parse`] if the
    /// file exists but cannot be used.
    pub fn merge_file(&mut self, path: &Utf8Path) -> Result<usize, CatalogError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path, "no user catalog");
                return Ok(0);
            }
            Err(err) => return Err(CatalogError::read(path, err)),
        };

        let file: CatalogFile = serde_json::from_str(&data)?;
        let merged = file.applications.len();

        for app in file.applications {
            if let Some(&slot) = self.index.get(&app.name) {
                self.apps[slot] = app;
            } else {
                self.index.insert(app.name.clone(), self.apps.len());
                self.apps.push(app);
            }
        }

        Ok(merged)
    }

    /// Returns the definition for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AppDefinition> {
        self.index.get(name).map(|&i| &self.apps[i])
    }

    /// Returns all applications in catalog order.
    #[must_use]
    pub fn apps(&self) -> &[AppDefinition] {
        &self.apps
    }

    /// Returns the number of applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns `true` if the catalog holds no applications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Returns the catalog with `~/`-relative candidate paths expanded.
    ///
    /// This is the form the scanner consumes: probes see absolute paths
    /// only.
    #[must_use]
    pub fn expanded(&self) -> Vec<AppDefinition> {
        self.apps
            .iter()
            .map(|app| {
                let mut app = app.clone();
                app.config_paths = app
                    .config_paths
                    .iter()
                    .map(|p| expand_tilde(p))
                    .collect();
                app
            })
            .collect()
    }
}

fn default_user_catalog_path() -> Option<Utf8PathBuf> {
    scout_core::paths::home_dir().map(|home| home.join(USER_CATALOG_PATH))
}
