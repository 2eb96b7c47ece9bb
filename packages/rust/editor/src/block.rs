//! Line-oriented label insertion into `labels = { ... }` blocks.
//!
//! Deliberately not an HCL parser: every line the editor does not add
//! survives byte-for-byte, comments and formatting included. The block
//! detector is single-level — it tracks one opener/closer pair, and
//! only the first `labels = {` block in a file is ever edited.

use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use terralabel_lookup::format_contact_label;
use terralabel_shared::{EditOutcome, LabelerError, Result};

/// Literal substring that opens the labels block.
const BLOCK_OPENER: &str = "labels = {";

/// The label key, padded so the `=` lines up with wide neighboring keys.
const LABEL_KEY_PADDED: &str = "biso_team                   ";

/// Fallback indentation when the line before the closer is not a label.
const DEFAULT_INDENT: &str = "    ";

/// Matches a `key = "value"` label line, capturing its leading whitespace.
static LABEL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*)[A-Za-z0-9_-]+\s*=\s*".*""#).expect("label line regex")
});

/// Insert a `biso_team` label for `identifier` into the file at `path`.
///
/// The identifier is formatted via [`format_contact_label`] before
/// insertion. When no `labels = {` opener exists the file is not
/// touched at all; when one does, the rewrite goes through a temp file
/// in the same directory and an atomic rename.
pub fn insert_label(path: &Path, identifier: &str) -> Result<EditOutcome> {
    let content = std::fs::read_to_string(path).map_err(|e| LabelerError::io(path, e))?;

    match splice_label(&content, identifier) {
        Some(splice) => {
            write_atomic(path, &splice.content)?;
            Ok(EditOutcome::Modified {
                inserted: splice.inserted,
            })
        }
        None => Ok(EditOutcome::BlockNotFound),
    }
}

/// Result of a successful splice: the full rewritten content plus the
/// label line that was added (`None` when the opener had no closer).
struct Splice {
    content: String,
    inserted: Option<String>,
}

/// Pure line-oriented splice of the label into `content`.
///
/// Returns `None` when no `labels = {` opener exists, in which case the
/// caller must leave the file alone.
fn splice_label(content: &str, identifier: &str) -> Option<Splice> {
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };

    let mut out: Vec<String> = Vec::new();
    let mut in_block = false;
    let mut block_found = false;
    let mut inserted: Option<String> = None;

    for line in content.split_inclusive('\n') {
        out.push(line.to_string());

        if inserted.is_some() {
            continue;
        }

        if !in_block && !block_found && line.contains(BLOCK_OPENER) {
            in_block = true;
            block_found = true;
            continue;
        }

        if in_block && line.trim() == "}" {
            // The line immediately preceding the closer is the
            // indentation reference; an opener or blank line there
            // falls back to four spaces.
            let indent = out
                .len()
                .checked_sub(2)
                .and_then(|i| LABEL_LINE_RE.captures(&out[i]))
                .map_or(DEFAULT_INDENT.to_string(), |caps| caps[1].to_string());

            let value = format_contact_label(identifier);
            let label_line = format!("{indent}{LABEL_KEY_PADDED}= \"{value}\"");

            // Insert immediately before the closer already appended.
            let closer_idx = out.len() - 1;
            out.insert(closer_idx, format!("{label_line}{eol}"));

            inserted = Some(label_line);
            in_block = false;
        }
    }

    if !block_found {
        return None;
    }

    Some(Splice {
        content: out.concat(),
        inserted,
    })
}

/// Replace `path` with `content` via a sibling temp file and rename, so
/// an interrupted run leaves the target either old or new, never
/// truncated.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
        .map_err(|e| LabelerError::io(path, e))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| LabelerError::io(path, e))?;
    tmp.persist(path).map_err(|e| LabelerError::io(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT: &str = "user@teco.com.ar";

    #[test]
    fn inserts_before_closer_with_sibling_indentation() {
        let content = "inputs = {\n  name = \"proj1\"\n  labels = {\n    env = \"prod\"\n  }\n}\n";
        let splice = splice_label(content, CONTACT).unwrap();

        assert_eq!(
            splice.inserted.as_deref(),
            Some("    biso_team                   = \"user-teco_com_ar\"")
        );
        assert_eq!(
            splice.content,
            "inputs = {\n  name = \"proj1\"\n  labels = {\n    env = \"prod\"\n    biso_team                   = \"user-teco_com_ar\"\n  }\n}\n"
        );
    }

    #[test]
    fn default_indent_when_no_label_sibling() {
        let content = "labels = {\n}\n";
        let splice = splice_label(content, CONTACT).unwrap();

        assert_eq!(
            splice.content,
            "labels = {\n    biso_team                   = \"user-teco_com_ar\"\n}\n"
        );
    }

    #[test]
    fn blank_line_before_closer_uses_default_indent() {
        let content = "labels = {\n      env = \"prod\"\n\n}\n";
        let splice = splice_label(content, CONTACT).unwrap();

        let inserted = splice.inserted.unwrap();
        assert!(inserted.starts_with("    biso_team"));
    }

    #[test]
    fn no_block_returns_none() {
        let content = "inputs = {\n  name = \"proj1\"\n}\n";
        assert!(splice_label(content, CONTACT).is_none());
    }

    #[test]
    fn rerun_duplicates_label_line() {
        let content = "labels = {\n  env = \"prod\"\n}\n";
        let once = splice_label(content, CONTACT).unwrap();
        let twice = splice_label(&once.content, CONTACT).unwrap();

        let count = twice
            .content
            .lines()
            .filter(|l| l.contains("biso_team"))
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn only_first_block_is_edited() {
        let content = "labels = {\n  a = \"1\"\n}\nlabels = {\n  b = \"2\"\n}\n";
        let splice = splice_label(content, CONTACT).unwrap();

        let count = splice
            .content
            .lines()
            .filter(|l| l.contains("biso_team"))
            .count();
        assert_eq!(count, 1);
        // The insertion landed in the first block
        assert!(
            splice.content.find("biso_team").unwrap() < splice.content.find("b = \"2\"").unwrap()
        );
    }

    #[test]
    fn opener_without_closer_rewrites_unchanged() {
        let content = "labels = {\n  env = \"prod\"\n";
        let splice = splice_label(content, CONTACT).unwrap();

        assert_eq!(splice.inserted, None);
        assert_eq!(splice.content, content);
    }

    #[test]
    fn crlf_convention_preserved() {
        let content = "labels = {\r\n  env = \"prod\"\r\n}\r\n";
        let splice = splice_label(content, CONTACT).unwrap();

        assert_eq!(
            splice.content,
            "labels = {\r\n  env = \"prod\"\r\n  biso_team                   = \"user-teco_com_ar\"\r\n}\r\n"
        );
    }

    #[test]
    fn contact_without_team_domain_kept_verbatim() {
        let content = "labels = {\n  env = \"prod\"\n}\n";
        let splice = splice_label(content, "group@other.com").unwrap();

        assert!(splice.content.contains("= \"group@other.com\""));
    }

    #[test]
    fn fixture_file_gets_label_before_block_closer() {
        let content = std::fs::read_to_string("../../../fixtures/hcl/terragrunt.hcl")
            .expect("read hcl fixture");
        let splice = splice_label(&content, "billing-team@teco.com.ar").unwrap();

        let lines: Vec<&str> = splice.content.lines().collect();
        let idx = lines
            .iter()
            .position(|l| l.contains("biso_team"))
            .expect("inserted line present");

        // Indentation copied from the cost_center sibling, closer right after
        assert_eq!(
            lines[idx],
            "    biso_team                   = \"billing-team-teco_com_ar\""
        );
        assert_eq!(lines[idx + 1].trim(), "}");

        // Nothing else changed
        assert_eq!(lines.len(), content.lines().count() + 1);
        for line in content.lines() {
            assert!(splice.content.contains(line));
        }
    }

    #[test]
    fn insert_label_modifies_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terragrunt.hcl");
        std::fs::write(&path, "labels = {\n  env = \"prod\"\n}\n").unwrap();

        let outcome = insert_label(&path, CONTACT).unwrap();
        assert!(matches!(outcome, EditOutcome::Modified { inserted: Some(_) }));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("biso_team                   = \"user-teco_com_ar\""));
    }

    #[test]
    fn insert_label_leaves_file_untouched_without_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terragrunt.hcl");
        let original = "inputs = {\n  name = \"proj1\"\n}\n";
        std::fs::write(&path, original).unwrap();

        let outcome = insert_label(&path, CONTACT).unwrap();
        assert_eq!(outcome, EditOutcome::BlockNotFound);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }
}
