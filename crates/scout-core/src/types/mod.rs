//! Domain types for appscout.
//!
//! This module contains the core domain types used throughout the
//! application for representing catalog entries, probe outcomes, aggregated
//! statuses, and scan snapshots.
//!
//! # Module Organization
//!
//! - [`app`] - Application catalog entries
//! - [`status`] - Per-application configuration status
//! - [`outcome`] - Raw probe outcomes and their aggregation
//! - [`snapshot`] - The terminal scan aggregate
//!
//! All public types are re-exported at this module level and at the crate
//! root:
//!
//! ```
//! use scout_core::{AppDefinition, AppStatus, ConfigStatus, ScanSnapshot};
//! ```

mod app;
mod outcome;
mod snapshot;
mod status;

pub use app::AppDefinition;
pub use outcome::{AppStatus, ProbeOutcome};
pub use snapshot::ScanSnapshot;
pub use status::ConfigStatus;
