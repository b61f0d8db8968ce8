//! Wikilink and embed parsing.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// [[target]], ![[target]], with an optional |alias and/or #fragment after the target.
// (!?)              - Optional ! for embeds (group 1)
// \[\[              - Opening [[
// ([^\]\|#]+)       - Target path (group 2)
// (?:\|[^\]]+)?     - Alias, discarded
// (?:#[^\]]+)?      - Fragment, discarded
// \]\]              - Closing ]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]\|#]+)(?:\|[^\]]+)?(?:#[^\]]+)?\]\]").unwrap()
});

/// A wikilink or embed target found in note text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WikiLink {
    /// The raw target, alias and fragment removed.
    pub target: String,
    /// Whether this is an embed (`![[...]]`).
    pub embed: bool,
}

/// Parse all wikilinks and embeds from content, in document order.
pub fn parse_wikilinks(content: &str) -> Vec<WikiLink> {
    WIKILINK
        .captures_iter(content)
        .map(|cap| WikiLink {
            embed: cap.get(1).is_some_and(|m| !m.as_str().is_empty()),
            target: cap.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
        })
        .collect()
}

/// Parse only the wikilink targets.
pub fn wikilink_targets(content: &str) -> Vec<String> {
    parse_wikilinks(content).into_iter().map(|l| l.target).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_link() {
        let links = parse_wikilinks("See [[My Note]] for details.");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "My Note");
        assert!(!links[0].embed);
    }

    #[test]
    fn test_embed() {
        let links = parse_wikilinks("![[image.png]]");
        assert_eq!(links.len(), 1);
        assert!(links[0].embed);
        assert_eq!(links[0].target, "image.png");
    }

    #[test]
    fn test_alias_and_fragment_stripped() {
        assert_eq!(wikilink_targets("[[a/b.png|alias#frag]]"), vec!["a/b.png"]);
        assert_eq!(wikilink_targets("[[Note#Section|alias]]"), vec!["Note"]);
        assert_eq!(wikilink_targets("[[Note#^abc123]]"), vec!["Note"]);
        assert_eq!(wikilink_targets("![[photo.jpg|400]]"), vec!["photo.jpg"]);
    }

    #[test]
    fn test_multiple_links_in_order() {
        let content = "See [[Note A]] and [[Note B|B]] and ![[image.png]].";
        assert_eq!(wikilink_targets(content), vec!["Note A", "Note B", "image.png"]);
    }

    #[test]
    fn test_duplicates_kept() {
        let content = "![[x.png]] twice ![[x.png]]";
        assert_eq!(wikilink_targets(content).len(), 2);
    }

    #[test]
    fn test_link_with_path() {
        assert_eq!(
            wikilink_targets("[[folder/subfolder/note]]"),
            vec!["folder/subfolder/note"]
        );
    }

    #[test]
    fn test_unclosed_is_not_a_link() {
        assert!(parse_wikilinks("[[broken").is_empty());
        assert!(parse_wikilinks("[[]]").is_empty());
    }
}
