//! Report formatting utilities
//!
//! Helpers for rendering decoded tag groups as human-readable text.

use crate::exif::types::{TagMap, TagValue};

/// Renders a tag group as "Name: value" lines sorted by tag name
pub fn format_tag_lines(tags: &TagMap) -> Vec<String> {
    let mut entries: Vec<(&String, &TagValue)> = tags.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries
        .into_iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect()
}

/// Renders an optional offset
pub fn format_offset(offset: Option<usize>) -> String {
    offset.map_or_else(|| "not present".to_string(), |o| o.to_string())
}
