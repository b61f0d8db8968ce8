//! Vault scan: index once, then examine every note in parallel.

use crate::error::{Result, VaultError};
use crate::note::{process_note, NoteRecord};
use crate::vault::Vault;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Notes selected by a scan, sorted by path.
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub notes: Vec<NoteRecord>,
    pub summary: ScanSummary,
}

/// Totals over a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files in the vault index.
    pub indexed_files: usize,
    /// Notes examined.
    pub scanned_notes: usize,
    /// Notes that matched.
    pub matched_notes: usize,
    /// Attachments across matched notes (counted per note).
    pub attachments: usize,
    /// Bytes across matched notes.
    pub total_size: u64,
    /// `total_size`, human readable.
    pub total_size_human: String,
}

/// Scan the vault for notes carrying any of `targets`.
///
/// Worker completion order never leaks: results are sorted by path.
pub fn scan_notes(vault: &Vault, targets: &HashSet<String>) -> Result<ScanResult> {
    if targets.is_empty() {
        return Err(VaultError::NoTags);
    }

    let index = vault.build_index();
    let paths = vault.list_notes();
    info!("scanning {} notes for {} tags", paths.len(), targets.len());

    let work = || -> Vec<NoteRecord> {
        paths
            .par_iter()
            .filter_map(|path| process_note(path, targets, &vault.root, &index, &vault.config))
            .collect()
    };

    let mut notes = match vault.config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| VaultError::Other(format!("failed to start scan workers: {}", e)))?
            .install(work),
        None => work(),
    };
    notes.sort_by(|a, b| a.path.cmp(&b.path));

    let total_size: u64 = notes.iter().map(|n| n.size).sum();
    let summary = ScanSummary {
        indexed_files: index.file_count(),
        scanned_notes: paths.len(),
        matched_notes: notes.len(),
        attachments: notes.iter().map(|n| n.attachments.len()).sum(),
        total_size,
        total_size_human: format_size(total_size),
    };
    info!("{} of {} notes matched", summary.matched_notes, summary.scanned_notes);

    Ok(ScanResult { notes, summary })
}

/// Format a byte count like `1.5 KB`.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}
