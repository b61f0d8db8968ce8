//! Tag extraction and target-tag matching.

use crate::parser::frontmatter::{frontmatter_mapping, string_values};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

// An inline tag: `#` at the start of the text or after whitespace, followed
// by word characters or hyphens. Headings (`# Title`) never match.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|\s)#([\w-]+)").unwrap());

// User tag input: `#work project #a-b` style lists.
static TAG_INPUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#?([\w-]+)").unwrap());

/// Parse inline tags from note text (names without `#`), in document order.
pub fn parse_inline_tags(content: &str) -> Vec<String> {
    TAG.captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Parse tags from the frontmatter `tags` field.
///
/// Accepts a single string or a list of strings; a leading `#` is stripped.
pub fn parse_frontmatter_tags(content: &str) -> Vec<String> {
    let Some(map) = frontmatter_mapping(content) else {
        return Vec::new();
    };
    match map.get("tags") {
        Some(value) => string_values(value)
            .into_iter()
            .map(|t| t.trim_start_matches('#').to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// All tags of a note: inline tags unioned with frontmatter tags.
pub fn note_tags(content: &str) -> HashSet<String> {
    let mut tags: HashSet<String> = parse_inline_tags(content).into_iter().collect();
    tags.extend(parse_frontmatter_tags(content));
    tags
}

/// Intersect a note's tags with the requested target tags.
///
/// Comparison is case-sensitive. An empty result means the note does not match.
pub fn matched_tags(content: &str, targets: &HashSet<String>) -> BTreeSet<String> {
    note_tags(content)
        .into_iter()
        .filter(|t| targets.contains(t))
        .collect()
}

/// Parse a user-supplied list of tags, with or without `#`.
pub fn parse_tag_input(input: &str) -> HashSet<String> {
    TAG_INPUT
        .captures_iter(input)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
