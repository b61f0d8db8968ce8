//! Move command: scan, then relocate notes and attachments.

use crate::cli::args::MoveArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::mover::{execute, MoveOptions, MoveReport};
use crate::scan::{scan_notes, ScanSummary};
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub scan: ScanSummary,
    pub result: MoveReport,
}

pub fn run(vault: &Vault, config: &Config, args: &MoveArgs, output: &Output) -> Result<ExitCode> {
    let destination = config.resolve_destination(args.dest.as_deref())?;
    let targets = args.selection.target_tags();
    let scanned = scan_notes(vault, &targets)?;

    if scanned.notes.is_empty() {
        output.info("No notes found with the given tags");
    }

    let options = MoveOptions {
        destination,
        dry_run: args.dry_run,
        create_destination: args.create_dest,
    };
    let report = execute(&scanned.notes, &options)?;

    let code = if report.has_errors() {
        output.info(&format!("{} items failed to move", report.errors.len()));
        ExitCode::MoveErrors
    } else {
        ExitCode::Success
    };

    output.print(&MoveResponse {
        scan: scanned.summary,
        result: report,
    })?;

    Ok(code)
}
