//! Directory walking and label injection over an infrastructure tree.
//!
//! Finds every `**/project/terragrunt.hcl` under a scan root, extracts
//! each file's project name, and inserts a team label when the project
//! has a lookup entry. Per-file failures are isolated: one unreadable
//! or unwritable file never stops the traversal.

mod block;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use terralabel_shared::{EditOutcome, LabelerError, ProjectLookup, Result, WalkSummary};
use tracing::{info, warn};
use walkdir::WalkDir;

pub use block::insert_label;

/// File name of the declaration the walker targets.
const TARGET_FILE_NAME: &str = "terragrunt.hcl";

/// Directory the target file must sit directly inside.
const TARGET_DIR_NAME: &str = "project";

/// Matches the `name = "<value>"` declaration; the first capture in the
/// file wins.
static PROJECT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"name\s*=\s*"([^"]+)""#).expect("project name regex")
});

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for per-file walk events.
pub trait WalkReporter {
    /// A target file's project name matched a lookup entry.
    fn file_matched(&self, path: &Path, project: &str);
    /// A label line was inserted (shown without its terminator).
    fn label_inserted(&self, path: &Path, line: &str);
    /// The matched file has no labels block and was left unchanged.
    fn block_missing(&self, path: &Path);
    /// The file could not be read or written; skipped.
    fn file_failed(&self, path: &Path, error: &LabelerError);
    /// The walk finished.
    fn done(&self, summary: &WalkSummary);
}

/// No-op reporter for headless/test usage.
pub struct SilentWalk;

impl WalkReporter for SilentWalk {
    fn file_matched(&self, _path: &Path, _project: &str) {}
    fn label_inserted(&self, _path: &Path, _line: &str) {}
    fn block_missing(&self, _path: &Path) {}
    fn file_failed(&self, _path: &Path, _error: &LabelerError) {}
    fn done(&self, _summary: &WalkSummary) {}
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// Walk `root` and inject a team label into every lookup hit.
///
/// `files_processed` counts every target file seen; `files_modified`
/// counts lookup hits, whether or not the edit then found a labels
/// block.
pub fn walk_tree(
    root: &Path,
    lookup: &ProjectLookup,
    reporter: &dyn WalkReporter,
) -> Result<WalkSummary> {
    if !root.is_dir() {
        return Err(LabelerError::path(root, "scan root is not a directory"));
    }

    info!(root = %root.display(), "scanning for terragrunt.hcl files");

    let mut summary = WalkSummary::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() || !is_target(entry.path()) {
            continue;
        }
        let path = entry.path();

        summary.files_processed += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let err = LabelerError::io(path, e);
                warn!(path = %path.display(), error = %err, "failed to read target file");
                reporter.file_failed(path, &err);
                continue;
            }
        };

        // No name declaration: processed, never modified.
        let Some(project) = PROJECT_NAME_RE
            .captures(&content)
            .map(|caps| caps[1].to_string())
        else {
            continue;
        };

        let Some(contact) = lookup.get(&project) else {
            continue;
        };

        reporter.file_matched(path, &project);
        summary.files_modified += 1;

        match block::insert_label(path, contact) {
            Ok(EditOutcome::Modified {
                inserted: Some(line),
            }) => {
                reporter.label_inserted(path, &line);
            }
            Ok(EditOutcome::Modified { inserted: None }) => {
                warn!(path = %path.display(), "labels block never closed; nothing inserted");
            }
            Ok(EditOutcome::BlockNotFound) => {
                warn!(path = %path.display(), "no labels block found; file left unchanged");
                reporter.block_missing(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to update target file");
                reporter.file_failed(path, &e);
            }
        }
    }

    info!(
        processed = summary.files_processed,
        modified = summary.files_modified,
        "walk complete"
    );

    reporter.done(&summary);

    Ok(summary)
}

/// Whether a path is a `**/project/terragrunt.hcl` match.
fn is_target(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == TARGET_FILE_NAME)
        && path
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|name| name == TARGET_DIR_NAME)
}
