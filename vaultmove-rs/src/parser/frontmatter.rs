//! YAML frontmatter splitting and parsing.

use crate::error::{Result, VaultError};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::debug;

/// Frontmatter extraction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// The block must open on the very first line with `---` and close with a
/// later `---` line. Trailing whitespace on either delimiter line and CRLF
/// line endings are accepted.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let none = FrontmatterSplit {
        yaml: None,
        body: content,
    };

    let Some(first_end) = content.find('\n') else {
        return none;
    };
    if !is_delimiter(&content[..first_end]) {
        return none;
    }

    let yaml_start = first_end + 1;
    let mut line_start = yaml_start;

    while line_start < content.len() {
        let line_end = content[line_start..]
            .find('\n')
            .map(|i| line_start + i)
            .unwrap_or(content.len());

        if is_delimiter(&content[line_start..line_end]) {
            // The newline before the closing delimiter is not part of the YAML.
            let yaml_end = line_start.saturating_sub(1).max(yaml_start);
            let yaml = content[yaml_start..yaml_end].trim_end_matches('\r');
            let body_start = (line_end + 1).min(content.len());
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &content[body_start..],
            };
        }

        line_start = line_end + 1;
    }

    none
}

fn is_delimiter(line: &str) -> bool {
    line.strip_prefix("---")
        .is_some_and(|rest| rest.chars().all(char::is_whitespace))
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Parse frontmatter into a serde_yaml::Value.
pub fn parse_frontmatter(content: &str) -> Result<Option<Value>> {
    parse_frontmatter_with_path(content, Path::new("<unknown>"))
}

/// Parse frontmatter with path context for error messages.
pub fn parse_frontmatter_with_path(content: &str, path: &Path) -> Result<Option<Value>> {
    match extract_frontmatter(content) {
        Some(yaml) => {
            let value: Value =
                serde_yaml::from_str(yaml).map_err(|e| VaultError::InvalidFrontmatter {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

/// Parse frontmatter as a key/value mapping, treating anything unusable as absent.
///
/// Malformed YAML and documents that are not a mapping yield `None`.
pub fn frontmatter_mapping(content: &str) -> Option<Mapping> {
    match parse_frontmatter(content) {
        Ok(Some(Value::Mapping(map))) => Some(map),
        Ok(_) => None,
        Err(e) => {
            debug!("ignoring frontmatter: {}", e);
            None
        }
    }
}

/// Collect the string values of a frontmatter entry: a single string, or
/// every string element of a list. Other value types contribute nothing.
pub fn string_values(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Sequence(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
