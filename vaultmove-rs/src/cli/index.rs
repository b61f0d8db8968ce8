//! Index command: inspect the vault file name index.

use crate::cli::args::IndexArgs;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct IndexStats {
    pub root: PathBuf,
    pub files: usize,
    pub names: usize,
    pub ambiguous_names: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ambiguous: Vec<AmbiguousName>,
}

#[derive(Debug, Serialize)]
pub struct AmbiguousName {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct NameCandidates {
    pub name: String,
    pub candidates: Vec<PathBuf>,
}

pub fn run(vault: &Vault, args: &IndexArgs, output: &Output) -> Result<ExitCode> {
    let index = vault.build_index();

    if let Some(ref name) = args.name {
        let response = NameCandidates {
            name: name.clone(),
            candidates: index
                .get(name)
                .iter()
                .map(|p| vault.relative(p).to_path_buf())
                .collect(),
        };
        output.print(&response)?;
        return Ok(ExitCode::Success);
    }

    let ambiguous = index.ambiguous_names();
    let response = IndexStats {
        root: vault.root.clone(),
        files: index.file_count(),
        names: index.name_count(),
        ambiguous_names: ambiguous.len(),
        ambiguous: if args.ambiguous {
            ambiguous
                .into_iter()
                .map(|(name, count)| AmbiguousName {
                    name: name.to_string(),
                    count,
                })
                .collect()
        } else {
            Vec::new()
        },
    };
    output.print(&response)?;

    Ok(ExitCode::Success)
}
