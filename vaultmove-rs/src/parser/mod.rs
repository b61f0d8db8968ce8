//! Parsers for Obsidian markdown syntax.

pub mod frontmatter;
pub mod links;
pub mod markdown_link;
pub mod tag;
pub mod wikilink;

pub use frontmatter::{
    extract_frontmatter, frontmatter_mapping, parse_frontmatter, parse_frontmatter_with_path,
    split_frontmatter,
};
pub use links::{clean_link, extract_raw_links, frontmatter_links};
pub use markdown_link::markdown_link_targets;
pub use tag::{matched_tags, note_tags, parse_frontmatter_tags, parse_inline_tags, parse_tag_input};
pub use wikilink::{parse_wikilinks, wikilink_targets};
