//! vaultmove - move tagged notes and their attachments out of Obsidian-style vaults.
//!
//! # Overview
//!
//! A run has two phases:
//! - **Scan** (parallel): index every file in the vault by lowercased name,
//!   then read each note, keep those carrying a target tag, and resolve every
//!   attachment it references (wikilinks, markdown links, frontmatter fields).
//! - **Move** (sequential): move each selected note and its attachments into
//!   a destination directory, tolerating attachments shared between notes.
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashSet;
//! use vaultmove::{scan_notes, ScanConfig, Vault};
//!
//! let vault = Vault::open("/path/to/vault", ScanConfig::default()).unwrap();
//! let targets: HashSet<String> = ["ready".to_string()].into();
//!
//! for note in scan_notes(&vault, &targets).unwrap().notes {
//!     println!("{} -> {:?}", note.path.display(), note.attachments);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod mover;
pub mod note;
pub mod parser;
pub mod resolver;
pub mod scan;
pub mod vault;

// Re-export main types at crate root
pub use config::{Config, ScanConfig};
pub use error::{Result, VaultError};
pub use index::VaultIndex;
pub use mover::{execute, MoveOptions, MoveReport};
pub use note::NoteRecord;
pub use resolver::{resolve, ResolveContext};
pub use scan::{scan_notes, ScanResult};
pub use vault::Vault;
