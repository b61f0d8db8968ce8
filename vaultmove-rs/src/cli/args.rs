//! CLI argument definitions using clap.

use crate::config::ScanConfig;
use crate::parser::parse_tag_input;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultmove")]
#[command(author, version, about = "Move tagged notes and their attachments out of a vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Path to a config file (default: <config dir>/vaultmove/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show which notes and attachments a move would take
    Scan(ScanArgs),

    /// Move tagged notes and their attachments into a directory
    Move(MoveArgs),

    /// Show the references of one note and how each resolves
    Links(LinksArgs),

    /// Resolve a single link as seen from a note
    Resolve(ResolveArgs),

    /// Show vault index statistics or the candidates for a file name
    Index(IndexArgs),
}

impl Commands {
    /// The note selection flags, for commands that scan.
    pub fn selection(&self) -> Option<&SelectionArgs> {
        match self {
            Commands::Scan(args) => Some(&args.selection),
            Commands::Move(args) => Some(&args.selection),
            _ => None,
        }
    }
}

/// Which notes to select and how to walk the vault.
#[derive(Args, Debug)]
pub struct SelectionArgs {
    /// Tag to select (repeatable; `#` optional; a note matches any of them)
    #[arg(short, long = "tag", required = true)]
    pub tags: Vec<String>,

    /// Directory names to skip (repeatable; replaces the configured list)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Scan worker threads
    #[arg(long)]
    pub threads: Option<usize>,
}

impl SelectionArgs {
    /// Parse the target tags.
    pub fn target_tags(&self) -> HashSet<String> {
        self.tags.iter().flat_map(|t| parse_tag_input(t)).collect()
    }

    /// Apply these flags on top of the configured scan settings.
    pub fn apply(&self, config: &mut ScanConfig) {
        if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
    }
}

// === Scan ===

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Limit the number of notes listed (totals still cover all matches)
    #[arg(long)]
    pub limit: Option<usize>,
}

// === Move ===

#[derive(Parser, Debug)]
pub struct MoveArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Destination directory (overrides config default)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Create the destination if it does not exist
    #[arg(long)]
    pub create_dest: bool,

    /// Show what would be moved without making changes
    #[arg(long)]
    pub dry_run: bool,
}

// === Links ===

#[derive(Parser, Debug)]
pub struct LinksArgs {
    /// Path to the note (absolute, or relative to the vault)
    pub note: PathBuf,
}

// === Resolve ===

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path to the note the link appears in
    pub note: PathBuf,

    /// The raw link target
    pub link: String,
}

// === Index ===

#[derive(Parser, Debug)]
pub struct IndexArgs {
    /// Show the candidates for this file name
    #[arg(long)]
    pub name: Option<String>,

    /// List names shared by more than one file
    #[arg(long)]
    pub ambiguous: bool,
}
