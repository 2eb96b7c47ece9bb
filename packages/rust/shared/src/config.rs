//! Application configuration for terralabel.
//!
//! User config lives at `~/.terralabel/terralabel.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LabelerError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "terralabel.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".terralabel";

// ---------------------------------------------------------------------------
// Config structs (matching terralabel.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lookup file settings.
    #[serde(default)]
    pub lookup: LookupConfig,
}

/// `[lookup]` section: how the project → team lookup file is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Field separator in the lookup file.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Header name of the project-name column.
    #[serde(default = "default_project_column")]
    pub project_column: String,

    /// Header name of the team-contact column.
    #[serde(default = "default_team_column")]
    pub team_column: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            project_column: default_project_column(),
            team_column: default_team_column(),
        }
    }
}

fn default_delimiter() -> String {
    ";".into()
}
fn default_project_column() -> String {
    "PROJECT_NAME".into()
}
fn default_team_column() -> String {
    "BISO_TEAM".into()
}

impl LookupConfig {
    /// The delimiter as the single byte the CSV reader needs.
    ///
    /// Multi-character or non-ASCII delimiters are rejected up front so
    /// the failure surfaces before any file is opened.
    pub fn delimiter_byte(&self) -> Result<u8> {
        let mut bytes = self.delimiter.bytes();
        match (bytes.next(), bytes.next()) {
            (Some(b), None) if b.is_ascii() => Ok(b),
            _ => Err(LabelerError::config(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.terralabel/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LabelerError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.terralabel/terralabel.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LabelerError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| LabelerError::config(format!("failed to parse {}: {e}", path.display())))
}
