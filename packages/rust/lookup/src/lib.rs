//! Project → team lookup loading.
//!
//! Reads a delimited lookup file (default `;`-separated, UTF-8 with an
//! optional leading byte-order mark) into a [`ProjectLookup`]. Loading
//! is all-or-nothing: a missing column or a malformed row fails the
//! whole load, and no partial mapping is ever returned.

mod format;

use std::path::Path;

use terralabel_shared::{LabelerError, LookupConfig, ProjectLookup, Result};
use tracing::{debug, info};

pub use format::format_contact_label;

/// Byte-order mark some spreadsheet exports prepend to the header row.
const BOM: char = '\u{feff}';

/// Load the project → team lookup from a delimited file.
///
/// Required columns are named by `config`; rows where either trimmed
/// value is empty are skipped, and a project name appearing twice keeps
/// the later contact.
pub fn load_lookup(path: &Path, config: &LookupConfig) -> Result<ProjectLookup> {
    if !path.is_file() {
        return Err(LabelerError::path(path, "lookup file not found"));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| LabelerError::read(path, e.to_string()))?;

    let lookup = parse_lookup(&content, path, config)?;

    info!(
        path = %path.display(),
        entries = lookup.len(),
        "lookup loaded"
    );

    Ok(lookup)
}

/// Parse lookup file content already read into memory.
///
/// `path` is carried only for error context.
fn parse_lookup(content: &str, path: &Path, config: &LookupConfig) -> Result<ProjectLookup> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    let delimiter = config.delimiter_byte()?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LabelerError::read(path, e.to_string()))?
        .clone();

    let project_idx = headers.iter().position(|h| h == config.project_column);
    let team_idx = headers.iter().position(|h| h == config.team_column);

    let (Some(project_idx), Some(team_idx)) = (project_idx, team_idx) else {
        return Err(LabelerError::schema(format!(
            "lookup file must contain columns {:?} and {:?}; found columns: {:?}",
            config.project_column,
            config.team_column,
            headers.iter().collect::<Vec<_>>()
        )));
    };

    let mut lookup = ProjectLookup::new();

    for record in reader.records() {
        // A row with the wrong field count fails the whole load.
        let record = record.map_err(|e| LabelerError::read(path, e.to_string()))?;

        let project = record.get(project_idx).unwrap_or("").trim();
        let contact = record.get(team_idx).unwrap_or("").trim();

        if project.is_empty() || contact.is_empty() {
            debug!(
                line = record.position().map_or(0, |p| p.line()),
                "skipping row with empty project or contact"
            );
            continue;
        }

        lookup.insert(project, contact);
    }

    Ok(lookup)
}
