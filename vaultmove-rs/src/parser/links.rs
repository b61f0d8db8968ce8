//! Raw attachment reference extraction.
//!
//! Collects every reference a note makes to another file, in this order:
//! wikilinks and embeds, markdown links and images, then frontmatter
//! attachment fields. External links are dropped and the rest are cleaned
//! into plain relative paths or file names ready for resolution.

use crate::config::ScanConfig;
use crate::parser::frontmatter::{frontmatter_mapping, string_values};
use crate::parser::markdown_link::markdown_link_targets;
use crate::parser::wikilink::wikilink_targets;
use serde_yaml::Value;

/// Extract references from the frontmatter fields whose key names an attachment.
///
/// Wiki decoration (`!`, `[`, `]`) around each value is stripped.
pub fn frontmatter_links(content: &str, config: &ScanConfig) -> Vec<String> {
    let Some(map) = frontmatter_mapping(content) else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for (key, value) in &map {
        let Value::String(key) = key else { continue };
        if !config.is_attachment_key(key) {
            continue;
        }
        links.extend(
            string_values(value)
                .into_iter()
                .map(|v| v.trim_matches(|c| matches!(c, '!' | '[' | ']')).to_string()),
        );
    }
    links
}

/// Extract every raw link from note text, cleaned and with external links removed.
///
/// Duplicates are kept.
pub fn extract_raw_links(content: &str, config: &ScanConfig) -> Vec<String> {
    wikilink_targets(content)
        .into_iter()
        .chain(markdown_link_targets(content))
        .chain(frontmatter_links(content, config))
        .filter_map(|raw| clean_link(&raw, config))
        .collect()
}

/// Clean one raw reference.
///
/// External targets are rejected before anything else. The remainder is
/// percent-decoded, cut at the first `#` and `?`, and trimmed; an empty
/// result is rejected.
pub fn clean_link(raw: &str, config: &ScanConfig) -> Option<String> {
    if config.is_external(raw) {
        return None;
    }

    let decoded = percent_decode(raw);
    let without_fragment = decoded.split('#').next().unwrap_or("");
    let without_query = without_fragment.split('?').next().unwrap_or("");
    let cleaned = without_query.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Percent-decode, replacing invalid UTF-8 sequences.
fn percent_decode(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
