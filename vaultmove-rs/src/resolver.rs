//! Attachment resolution.
//!
//! A raw link is resolved by trying, in order:
//! 1. the path relative to the referencing note's directory
//! 2. the path relative to the vault root
//! 3. the file name alone, looked up case-insensitively in the vault index;
//!    several candidates are disambiguated by proximity to the note
//!
//! The first strategy that yields a path wins.

use crate::config::ScanConfig;
use crate::index::VaultIndex;
use crate::parser::extract_raw_links;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Everything a strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Directory of the referencing note.
    pub note_dir: &'a Path,
    /// Vault root.
    pub vault_root: &'a Path,
    /// Vault file name index.
    pub index: &'a VaultIndex,
}

/// A single resolution strategy.
pub type Strategy = fn(&str, &ResolveContext<'_>) -> Option<PathBuf>;

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    RelativeToNote,
    RelativeToVault,
    NameLookup,
}

/// The ordered strategy chain.
pub const STRATEGIES: &[(StrategyKind, Strategy)] = &[
    (StrategyKind::RelativeToNote, relative_to_note),
    (StrategyKind::RelativeToVault, relative_to_vault),
    (StrategyKind::NameLookup, name_lookup),
];

/// Resolve a raw link to an existing file.
pub fn resolve(raw: &str, ctx: &ResolveContext<'_>) -> Option<PathBuf> {
    explain(raw, ctx).map(|(_, path)| path)
}

/// Resolve a raw link and report which strategy matched.
pub fn explain(raw: &str, ctx: &ResolveContext<'_>) -> Option<(StrategyKind, PathBuf)> {
    for (kind, strategy) in STRATEGIES {
        if let Some(path) = strategy(raw, ctx) {
            debug!("resolved '{}' via {:?} -> {}", raw, kind, path.display());
            return Some((*kind, path));
        }
    }
    debug!("unresolved '{}' from {}", raw, ctx.note_dir.display());
    None
}

/// Join the link onto the note's directory.
pub fn relative_to_note(raw: &str, ctx: &ResolveContext<'_>) -> Option<PathBuf> {
    existing_file(ctx.note_dir, raw)
}

/// Join the link onto the vault root.
pub fn relative_to_vault(raw: &str, ctx: &ResolveContext<'_>) -> Option<PathBuf> {
    existing_file(ctx.vault_root, raw)
}

/// Look the file name up in the index, breaking ties by proximity.
pub fn name_lookup(raw: &str, ctx: &ResolveContext<'_>) -> Option<PathBuf> {
    let name = Path::new(raw).file_name()?.to_string_lossy();
    let candidates = ctx.index.get(&name);

    match candidates {
        [] => None,
        [only] => Some(only.clone()),
        _ => closest(candidates, ctx.note_dir).cloned(),
    }
}

/// Pick the candidate with the highest proximity to `note_dir`.
///
/// Ties go to the candidate that comes first.
pub fn closest<'a>(candidates: &'a [PathBuf], note_dir: &Path) -> Option<&'a PathBuf> {
    let mut best: Option<(&PathBuf, usize)> = None;
    for candidate in candidates {
        let score = proximity(candidate, note_dir);
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((candidate, score));
        }
    }
    best.map(|(path, _)| path)
}

/// Number of leading path components `candidate` shares with `note_dir`,
/// compared position by position from the root and stopping at the first
/// mismatch.
pub fn proximity(candidate: &Path, note_dir: &Path) -> usize {
    candidate
        .components()
        .zip(note_dir.components())
        .take_while(|(a, b)| a == b)
        .count()
}

fn existing_file(base: &Path, raw: &str) -> Option<PathBuf> {
    let path = normalize(&base.join(raw));
    path.is_file().then_some(path)
}

/// Lexically fold `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Decide whether a resolved path counts as an attachment.
pub fn accept_attachment(path: &Path, vault_root: &Path, config: &ScanConfig) -> bool {
    if config.is_rejected_extension(path) {
        return false;
    }
    if config.confine_to_vault && !path.starts_with(vault_root) {
        debug!("rejecting {} outside the vault", path.display());
        return false;
    }
    true
}

/// Find every attachment a note references.
///
/// Unresolvable links and rejected paths are dropped silently. Each path
/// appears once, in first-reference order.
pub fn find_attachments(
    content: &str,
    ctx: &ResolveContext<'_>,
    config: &ScanConfig,
) -> Vec<PathBuf> {
    let mut attachments: Vec<PathBuf> = Vec::new();
    for raw in extract_raw_links(content, config) {
        let Some(path) = resolve(&raw, ctx) else {
            continue;
        };
        if accept_attachment(&path, ctx.vault_root, config) && !attachments.contains(&path) {
            attachments.push(path);
        }
    }
    attachments
}
