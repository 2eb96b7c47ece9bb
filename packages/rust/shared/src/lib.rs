//! Shared types, error model, and configuration for terralabel.
//!
//! This crate is the foundation depended on by the other terralabel crates.
//! It provides:
//! - [`LabelerError`] — the unified error type
//! - Domain types ([`ProjectLookup`], [`EditOutcome`], [`WalkSummary`])
//! - Configuration ([`AppConfig`], [`LookupConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, LookupConfig, config_dir, config_file_path, load_config, load_config_from,
};
pub use error::{LabelerError, Result};
pub use types::{EditOutcome, ProjectLookup, WalkSummary};
