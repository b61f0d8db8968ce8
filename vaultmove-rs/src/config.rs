//! Configuration: the scan engine settings and the user config file.

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory names skipped by default when indexing and scanning.
pub const DEFAULT_EXCLUDE: &[&str] = &[".obsidian", ".git", ".trash"];

/// Front-matter key substrings whose values are treated as attachment references.
pub const DEFAULT_ATTACHMENT_KEYS: &[&str] =
    &["image", "cover", "banner", "file", "attachment", "thumbnail"];

/// Link prefixes that point outside the filesystem.
pub const DEFAULT_EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "//", "mailto:"];

/// Settings for the indexing, extraction and resolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Path segments (exact match) that exclude a file from the index and the scan.
    pub exclude: Vec<String>,

    /// Front-matter keys containing any of these substrings (case-insensitive)
    /// contribute attachment references.
    pub attachment_keys: Vec<String>,

    /// Links starting with any of these are external and never resolved.
    pub external_prefixes: Vec<String>,

    /// Extension (without dot) of candidate note files.
    pub note_extension: String,

    /// Resolved paths with these extensions are not attachments.
    pub rejected_extensions: Vec<String>,

    /// Reject resolved paths that fall outside the vault root.
    pub confine_to_vault: bool,

    /// Worker threads for the note scan. `None` uses the global rayon pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude: to_owned_vec(DEFAULT_EXCLUDE),
            attachment_keys: to_owned_vec(DEFAULT_ATTACHMENT_KEYS),
            external_prefixes: to_owned_vec(DEFAULT_EXTERNAL_PREFIXES),
            note_extension: "md".to_string(),
            rejected_extensions: vec!["md".to_string()],
            confine_to_vault: true,
            threads: None,
        }
    }
}

impl ScanConfig {
    /// Check whether a path segment is excluded.
    pub fn is_excluded(&self, segment: &str) -> bool {
        self.exclude.iter().any(|e| e == segment)
    }

    /// Check whether a link target is external.
    pub fn is_external(&self, target: &str) -> bool {
        self.external_prefixes.iter().any(|p| target.starts_with(p.as_str()))
    }

    /// Check whether a front-matter key names an attachment field.
    pub fn is_attachment_key(&self, key: &str) -> bool {
        let lower = key.to_lowercase();
        self.attachment_keys
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()))
    }

    /// Check whether a resolved path has a rejected extension.
    pub fn is_rejected_extension(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self
                .rejected_extensions
                .iter()
                .any(|r| r.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

/// Logging section of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level: error, warn, info, debug or trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// User configuration, read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default vault path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<PathBuf>,

    /// Default move destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    pub scan: ScanConfig,

    pub logging: LoggingConfig,
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("vaultmove").join("config.toml"))
    }

    /// Load the config from an explicit path, or from the default location.
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(VaultError::ConfigError(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load and parse a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config TOML.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.vault = config.vault.map(|p| expand_home(&p));
        config.destination = config.destination.map(|p| expand_home(&p));
        Ok(config)
    }

    /// Pick the vault path: CLI override first, then config.
    pub fn resolve_vault_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(expand_home(path));
        }
        self.vault.clone().ok_or_else(|| {
            VaultError::ConfigError(
                "no vault given: pass --vault or set `vault` in config.toml".to_string(),
            )
        })
    }

    /// Pick the destination: CLI override first, then config.
    pub fn resolve_destination(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(expand_home(path));
        }
        self.destination.clone().ok_or_else(|| {
            VaultError::ConfigError(
                "no destination given: pass --dest or set `destination` in config.toml"
                    .to_string(),
            )
        })
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn to_owned_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.exclude, vec![".obsidian", ".git", ".trash"]);
        assert_eq!(config.note_extension, "md");
        assert!(config.confine_to_vault);
        assert!(config.threads.is_none());
    }

    #[test]
    fn test_is_excluded_exact_segment() {
        let config = ScanConfig::default();
        assert!(config.is_excluded(".git"));
        assert!(!config.is_excluded(".github"));
        assert!(!config.is_excluded("git"));
    }

    #[test]
    fn test_is_external() {
        let config = ScanConfig::default();
        assert!(config.is_external("https://example.com/x.png"));
        assert!(config.is_external("//cdn.example.com/x.png"));
        assert!(config.is_external("mailto:me@example.com"));
        assert!(!config.is_external("images/x.png"));
    }

    #[test]
    fn test_is_attachment_key() {
        let config = ScanConfig::default();
        assert!(config.is_attachment_key("cover"));
        assert!(config.is_attachment_key("Banner_Image"));
        assert!(config.is_attachment_key("attachments"));
        assert!(config.is_attachment_key("profile"));
        assert!(!config.is_attachment_key("title"));
    }

    #[test]
    fn test_is_rejected_extension() {
        let config = ScanConfig::default();
        assert!(config.is_rejected_extension(Path::new("a/Note.md")));
        assert!(config.is_rejected_extension(Path::new("a/Note.MD")));
        assert!(!config.is_rejected_extension(Path::new("a/board.canvas")));
        assert!(!config.is_rejected_extension(Path::new("a/README")));
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse(
            r#"
vault = "/tmp/vault"

[scan]
exclude = [".git", "templates"]

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.vault, Some(PathBuf::from("/tmp/vault")));
        assert_eq!(config.scan.exclude, vec![".git", "templates"]);
        assert_eq!(config.scan.attachment_keys, ScanConfig::default().attachment_keys);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("vault = [");
        assert!(matches!(result, Err(VaultError::TomlParse(_))));
    }

    #[test]
    fn test_resolve_vault_path() {
        let config = Config {
            vault: Some(PathBuf::from("/from/config")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_vault_path(Some(Path::new("/from/cli"))).unwrap(),
            PathBuf::from("/from/cli")
        );
        assert_eq!(
            config.resolve_vault_path(None).unwrap(),
            PathBuf::from("/from/config")
        );
        assert!(Config::default().resolve_vault_path(None).is_err());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(VaultError::ConfigError(_))));
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        assert_eq!(expand_home(Path::new("rel/path")), PathBuf::from("rel/path"));
    }
}
