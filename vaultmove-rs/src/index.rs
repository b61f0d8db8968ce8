//! Case-insensitive file name index over a vault.

use crate::config::ScanConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Map from lowercased file name to every path sharing that name.
///
/// Built once per run and never updated; entries can go stale if files are
/// moved afterwards.
#[derive(Debug, Clone, Default)]
pub struct VaultIndex {
    entries: HashMap<String, Vec<PathBuf>>,
    file_count: usize,
}

impl VaultIndex {
    /// Index every file under `root` that is not inside an excluded segment.
    ///
    /// Paths sharing a name keep traversal order (sorted by file name per
    /// directory).
    pub fn build(root: &Path, config: &ScanConfig) -> Self {
        let mut index = Self::default();
        for path in walk_files(root, config) {
            index.insert(path);
        }
        info!(
            "indexed {} files ({} distinct names) under {}",
            index.file_count,
            index.entries.len(),
            root.display()
        );
        index
    }

    /// Add a path under its lowercased file name.
    pub fn insert(&mut self, path: PathBuf) {
        let Some(name) = path.file_name() else {
            return;
        };
        let key = name.to_string_lossy().to_lowercase();
        self.entries.entry(key).or_default().push(path);
        self.file_count += 1;
    }

    /// Candidates for a file name (any case).
    pub fn get(&self, name: &str) -> &[PathBuf] {
        self.entries
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of indexed files.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Number of distinct lowercased names.
    pub fn name_count(&self) -> usize {
        self.entries.len()
    }

    /// Names shared by more than one file, sorted.
    pub fn ambiguous_names(&self) -> Vec<(&str, usize)> {
        let mut names: Vec<(&str, usize)> = self
            .entries
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(name, paths)| (name.as_str(), paths.len()))
            .collect();
        names.sort();
        names
    }
}

/// Walk every file under `root`, pruning excluded segments.
///
/// Exclusion is by exact segment match below the root. Unreadable entries
/// are logged and skipped.
pub fn walk_files<'a>(
    root: &Path,
    config: &'a ScanConfig,
) -> impl Iterator<Item = PathBuf> + 'a {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            entry.depth() == 0 || !config.is_excluded(&entry.file_name().to_string_lossy())
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
}
