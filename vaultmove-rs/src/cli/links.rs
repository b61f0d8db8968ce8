//! Links command: every reference in one note and how it resolves.

use crate::cli::args::LinksArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::parser::{extract_raw_links, note_tags};
use crate::resolver::{accept_attachment, explain, ResolveContext, StrategyKind};
use crate::vault::Vault;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct LinksResponse {
    pub note: PathBuf,
    pub tags: BTreeSet<String>,
    pub links: Vec<LinkOutput>,
}

#[derive(Debug, Serialize)]
pub struct LinkOutput {
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    /// Whether the resolved file would move with the note.
    pub attachment: bool,
}

pub fn run(vault: &Vault, args: &LinksArgs, output: &Output) -> Result<ExitCode> {
    let note_path = vault.locate_note(&args.note)?;
    let content = String::from_utf8_lossy(&std::fs::read(&note_path)?).into_owned();

    let index = vault.build_index();
    let note_dir = note_path.parent().unwrap_or(&vault.root).to_path_buf();
    let ctx = ResolveContext {
        note_dir: &note_dir,
        vault_root: &vault.root,
        index: &index,
    };

    let links = extract_raw_links(&content, &vault.config)
        .into_iter()
        .map(|raw| {
            let found = explain(&raw, &ctx);
            let attachment = found
                .as_ref()
                .is_some_and(|(_, p)| accept_attachment(p, &vault.root, &vault.config));
            let (strategy, resolved) = match found {
                Some((kind, path)) => (Some(kind), Some(vault.relative(&path).to_path_buf())),
                None => (None, None),
            };
            LinkOutput {
                raw,
                resolved,
                strategy,
                attachment,
            }
        })
        .collect();

    let response = LinksResponse {
        note: vault.relative(&note_path).to_path_buf(),
        tags: note_tags(&content).into_iter().collect(),
        links,
    };
    output.print(&response)?;

    Ok(ExitCode::Success)
}
