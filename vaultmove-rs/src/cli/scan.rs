//! Scan command: preview the notes a move would take.

use crate::cli::args::ScanArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::note::NoteRecord;
use crate::scan::{format_size, scan_notes, ScanSummary};
use crate::vault::Vault;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub tags: BTreeSet<String>,
    pub notes: Vec<PlannedNote>,
    pub summary: ScanSummary,
}

/// A selected note, with paths relative to the vault.
#[derive(Debug, Serialize)]
pub struct PlannedNote {
    pub path: PathBuf,
    pub matched_tags: BTreeSet<String>,
    pub attachments: Vec<PathBuf>,
    pub size: u64,
    pub size_human: String,
}

impl PlannedNote {
    pub fn from_record(vault: &Vault, record: &NoteRecord) -> Self {
        Self {
            path: vault.relative(&record.path).to_path_buf(),
            matched_tags: record.matched_tags.clone(),
            attachments: record
                .attachments
                .iter()
                .map(|a| vault.relative(a).to_path_buf())
                .collect(),
            size: record.size,
            size_human: format_size(record.size),
        }
    }
}

pub fn run(vault: &Vault, args: &ScanArgs, output: &Output) -> Result<ExitCode> {
    let targets = args.selection.target_tags();
    let result = scan_notes(vault, &targets)?;

    let mut notes: Vec<PlannedNote> = result
        .notes
        .iter()
        .map(|n| PlannedNote::from_record(vault, n))
        .collect();
    if let Some(limit) = args.limit {
        notes.truncate(limit);
    }

    if result.notes.is_empty() {
        output.info("No notes found with the given tags");
    }

    let response = ScanResponse {
        tags: targets.into_iter().collect(),
        notes,
        summary: result.summary,
    };
    output.print(&response)?;

    Ok(ExitCode::Success)
}
