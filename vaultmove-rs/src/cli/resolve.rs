//! Resolve command: resolve a single link as seen from a note.

use crate::cli::args::ResolveArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::parser::clean_link;
use crate::resolver::{accept_attachment, explain, ResolveContext, StrategyKind};
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub note: PathBuf,
    pub link: String,
    /// The link after cleaning; absent when the link is external or empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    pub attachment: bool,
}

pub fn run(vault: &Vault, args: &ResolveArgs, output: &Output) -> Result<ExitCode> {
    let note_path = vault.locate_note(&args.note)?;
    let index = vault.build_index();
    let note_dir = note_path.parent().unwrap_or(&vault.root).to_path_buf();
    let ctx = ResolveContext {
        note_dir: &note_dir,
        vault_root: &vault.root,
        index: &index,
    };

    let cleaned = clean_link(&args.link, &vault.config);
    let found = cleaned.as_deref().and_then(|raw| explain(raw, &ctx));

    let mut response = ResolveResponse {
        note: vault.relative(&note_path).to_path_buf(),
        link: args.link.clone(),
        cleaned,
        resolved: None,
        strategy: None,
        attachment: false,
    };
    if let Some((kind, path)) = found {
        response.attachment = accept_attachment(&path, &vault.root, &vault.config);
        response.resolved = Some(vault.relative(&path).to_path_buf());
        response.strategy = Some(kind);
    }
    output.print(&response)?;

    Ok(ExitCode::Success)
}
