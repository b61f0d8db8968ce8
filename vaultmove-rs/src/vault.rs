//! Vault representation.

use crate::config::ScanConfig;
use crate::error::{Result, VaultError};
use crate::index::{walk_files, VaultIndex};
use std::path::{Path, PathBuf};

/// An Obsidian-style vault rooted at an absolute path.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Canonical root path of the vault.
    pub root: PathBuf,

    /// Engine settings for this vault.
    pub config: ScanConfig,
}

impl Vault {
    /// Open a vault. The root is canonicalized so every path the engine
    /// produces is absolute.
    pub fn open(root: impl AsRef<Path>, config: ScanConfig) -> Result<Self> {
        let root = root.as_ref();

        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root.to_path_buf()));
        }

        let root = root
            .canonicalize()
            .map_err(|_| VaultError::InvalidVaultPath(root.to_path_buf()))?;

        Ok(Self { root, config })
    }

    /// List every note file in the vault, sorted by path.
    pub fn list_notes(&self) -> Vec<PathBuf> {
        let ext = self.config.note_extension.as_str();
        let mut notes: Vec<PathBuf> = walk_files(&self.root, &self.config)
            .filter(|p| p.extension().is_some_and(|e| e == ext))
            .collect();
        notes.sort();
        notes
    }

    /// Build the file name index for this vault.
    pub fn build_index(&self) -> VaultIndex {
        VaultIndex::build(&self.root, &self.config)
    }

    /// Resolve a user-given note path: absolute, relative to the current
    /// directory, or relative to the vault root.
    pub fn locate_note(&self, query: &Path) -> Result<PathBuf> {
        let candidates = [query.to_path_buf(), self.root.join(query)];
        candidates
            .iter()
            .find(|p| p.is_file())
            .and_then(|p| p.canonicalize().ok())
            .ok_or_else(|| VaultError::NoteNotFound(query.to_path_buf()))
    }

    /// Get a path relative to the vault root, or the path itself if outside.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
