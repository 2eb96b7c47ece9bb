//! Core domain types for terralabel.

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// ProjectLookup
// ---------------------------------------------------------------------------

/// In-memory mapping from project name to team contact identifier.
///
/// Built once by the lookup loader, read-only for the rest of the run.
/// Inserting the same project twice keeps the later value, matching the
/// last-row-wins behavior of the lookup file.
#[derive(Debug, Clone, Default)]
pub struct ProjectLookup {
    entries: HashMap<String, String>,
}

impl ProjectLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A duplicate project name silently overwrites
    /// the earlier contact.
    pub fn insert(&mut self, project: impl Into<String>, contact: impl Into<String>) {
        self.entries.insert(project.into(), contact.into());
    }

    /// Look up the contact identifier for a project name.
    pub fn get(&self, project: &str) -> Option<&str> {
        self.entries.get(project).map(String::as_str)
    }

    /// Number of distinct projects in the lookup.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lookup holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// EditOutcome
// ---------------------------------------------------------------------------

/// Outcome of a single block-editor invocation on one target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The `labels = {` opener was found and the file was rewritten.
    ///
    /// `inserted` is the full label line that was added, without its
    /// terminator. It is `None` in the degenerate case where the opener
    /// had no closing `}` line, in which case the rewritten content is
    /// identical to the original.
    Modified { inserted: Option<String> },

    /// No `labels = {` block in the file; left byte-for-byte unchanged.
    BlockNotFound,
}

// ---------------------------------------------------------------------------
// WalkSummary
// ---------------------------------------------------------------------------

/// Counters accumulated over one directory walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Target files visited (every `**/project/terragrunt.hcl` match).
    pub files_processed: usize,

    /// Target files whose project name was present in the lookup.
    ///
    /// Incremented on the lookup hit, before the edit outcome is known:
    /// a matched file whose labels block turns out to be missing still
    /// counts.
    pub files_modified: usize,
}
