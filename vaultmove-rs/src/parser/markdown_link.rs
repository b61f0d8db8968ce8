//! Standard markdown link and image parsing.

use regex::Regex;
use std::sync::LazyLock;

// [label](target) or ![label](target), optionally with a quoted title.
// The target stops at whitespace, a quote or the closing paren.
static MD_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"!?\[[^\]]*\]\(([^" )]+)(?:\s+"[^"]*")?\)"#).unwrap()
});

/// Parse the targets of all markdown links and images, in document order.
pub fn markdown_link_targets(content: &str) -> Vec<String> {
    MD_LINK
        .captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
