//! Error types and exit codes for vaultmove.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 2;
    pub const NO_TAGS: i32 = 3;
    pub const INVALID_CONFIG: i32 = 5;
    pub const MOVE_ERRORS: i32 = 6;
}

/// Main error type for vaultmove operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Invalid vault path: {0}")]
    InvalidVaultPath(PathBuf),

    #[error("Destination is not a directory: {0}")]
    DestinationInvalid(PathBuf),

    #[error("Destination does not exist: {0} (pass --create-dest to create it)")]
    DestinationMissing(PathBuf),

    #[error("No tags given")]
    NoTags,

    #[error("Note not found: {0}")]
    NoteNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Failed to move {path}: {source}")]
    MoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{0}")]
    Other(String),
}

impl VaultError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::VaultNotFound(_) | VaultError::InvalidVaultPath(_) => {
                exit_code::VAULT_NOT_FOUND
            }
            VaultError::NoTags => exit_code::NO_TAGS,
            VaultError::ConfigError(_) | VaultError::TomlParse(_) => exit_code::INVALID_CONFIG,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultmove operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Exit code for CLI operations that complete without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    MoveErrors,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::MoveErrors => exit_code::MOVE_ERRORS,
        }
    }
}
