//! A scanned note that matched the target tags.

use crate::config::ScanConfig;
use crate::parser::matched_tags;
use crate::resolver::{find_attachments, ResolveContext};
use crate::index::VaultIndex;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A note selected for moving, fully resolved at construction.
///
/// Records only exist for notes with at least one matched tag.
#[derive(Debug, Clone, Serialize)]
pub struct NoteRecord {
    /// Absolute path of the note.
    pub path: PathBuf,

    /// Directory the note's relative links resolve against.
    pub dir: PathBuf,

    /// Raw note text.
    #[serde(skip)]
    pub content: String,

    /// Target tags the note carries.
    pub matched_tags: BTreeSet<String>,

    /// Resolved attachment paths, in first-reference order.
    pub attachments: Vec<PathBuf>,

    /// Size of the note file in bytes.
    pub size: u64,
}

impl NoteRecord {
    /// File name of the note.
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

/// Read a note and build its record if it carries any target tag.
///
/// Invalid UTF-8 is replaced rather than rejected. A note that cannot be
/// read is logged and skipped.
pub fn process_note(
    path: &Path,
    targets: &HashSet<String>,
    vault_root: &Path,
    index: &VaultIndex,
    config: &ScanConfig,
) -> Option<NoteRecord> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("skipping unreadable note {}: {}", path.display(), e);
            return None;
        }
    };
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let matched = matched_tags(&content, targets);
    if matched.is_empty() {
        return None;
    }

    let dir = path.parent().unwrap_or(vault_root).to_path_buf();
    let ctx = ResolveContext {
        note_dir: &dir,
        vault_root,
        index,
    };
    let attachments = find_attachments(&content, &ctx, config);

    Some(NoteRecord {
        path: path.to_path_buf(),
        dir,
        size: bytes.len() as u64,
        content,
        matched_tags: matched,
        attachments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn targets(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matching_note_resolves_attachments() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("notes")).unwrap();
        fs::write(root.join("notes/pic.png"), b"png").unwrap();
        let note = root.join("notes/n.md");
        fs::write(&note, "#ready ![[pic.png]] ![](https://example.com/x.png)").unwrap();

        let config = ScanConfig::default();
        let index = VaultIndex::build(&root, &config);
        let record = process_note(&note, &targets(&["ready"]), &root, &index, &config).unwrap();

        assert_eq!(record.dir, root.join("notes"));
        assert_eq!(record.attachments, vec![root.join("notes/pic.png")]);
        assert_eq!(record.matched_tags.iter().collect::<Vec<_>>(), vec!["ready"]);
        assert_eq!(record.size, fs::metadata(&note).unwrap().len());
        assert_eq!(record.file_name(), "n.md");
    }

    #[test]
    fn test_non_matching_note_discarded() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("n.md");
        fs::write(&note, "#draft only").unwrap();

        let config = ScanConfig::default();
        let index = VaultIndex::default();
        assert!(process_note(&note, &targets(&["done"]), dir.path(), &index, &config).is_none());
    }

    #[test]
    fn test_unreadable_note_skipped() {
        let dir = TempDir::new().unwrap();
        let config = ScanConfig::default();
        let index = VaultIndex::default();
        let missing = dir.path().join("gone.md");
        assert!(process_note(&missing, &targets(&["x"]), dir.path(), &index, &config).is_none());
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("n.md");
        fs::write(&note, b"#ready \xFF\xFE text").unwrap();

        let config = ScanConfig::default();
        let index = VaultIndex::default();
        let record = process_note(&note, &targets(&["ready"]), dir.path(), &index, &config);
        assert!(record.is_some());
    }
}
