//! Core types, errors, and configuration for appscout.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for consistent error handling
//! - Configuration structures
//! - Domain types (`AppDefinition`, `ProbeOutcome`, `AppStatus`, `ScanSnapshot`)
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)
//! - Home-relative path expansion

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod paths;
pub mod types;

pub use config::{CatalogConfig, Config, ScanConfig};
pub use error::{ConfigError, ProbeError};
pub use hash::{fx_hash_map, fx_hash_set, FxBuildHasher, FxHashMap, FxHashSet};
pub use paths::expand_tilde;
pub use types::{AppDefinition, AppStatus, ConfigStatus, ProbeOutcome, ScanSnapshot};
