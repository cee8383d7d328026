//! EXIF tag catalogs and label tables
//!
//! The curated tag catalogs (primary TIFF, EXIF, GPS and thumbnail IFDs) and
//! the value-to-label tables for enumerated tags are kept in a TOML document
//! that is embedded at compile time and parsed once on first use.

use std::collections::HashMap;
use std::fmt;
use std::fs;

use lazy_static::lazy_static;
use log::debug;

use crate::exif::errors::{ExifError, ExifResult};

lazy_static! {
    static ref EXIF_DEFINITIONS: TagDefinitions = {
        let content = include_str!("../../exif_tags.toml");
        TagDefinitions::from_str(content).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to parse EXIF tag definitions: {}", e);
            TagDefinitions::default()
        })
    };
}

/// Returns the built-in tag definitions
pub fn default_definitions() -> &'static TagDefinitions {
    &EXIF_DEFINITIONS
}

/// The logical tag groups of an EXIF segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    /// Primary image tags (IFD0)
    Tiff,
    /// EXIF sub-IFD
    Exif,
    /// GPS sub-IFD
    Gps,
    /// Thumbnail image tags (IFD1)
    Thumbnail,
}

impl TagGroup {
    pub const ALL: [TagGroup; 4] = [TagGroup::Tiff, TagGroup::Exif, TagGroup::Gps, TagGroup::Thumbnail];

    /// Canonical name, also the table name in the definition file
    pub fn name(&self) -> &'static str {
        match self {
            TagGroup::Tiff => "tiff",
            TagGroup::Exif => "exif",
            TagGroup::Gps => "gps",
            TagGroup::Thumbnail => "thumbnail",
        }
    }

    /// Parses a group name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        TagGroup::ALL
            .into_iter()
            .find(|group| group.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TagGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container for tag catalogs and label tables
#[derive(Debug, Default)]
pub struct TagDefinitions {
    // Maps tag IDs to tag names, per group
    catalogs: HashMap<TagGroup, HashMap<u16, String>>,
    // Maps tag names to their raw-value -> label table
    labels: HashMap<String, HashMap<String, String>>,
}

impl TagDefinitions {
    /// Parse tag definitions from a TOML string
    pub fn from_str(content: &str) -> ExifResult<Self> {
        let toml_value: toml::Value = content
            .parse()
            .map_err(|e| ExifError::InvalidDefinitions(format!("Failed to parse TOML: {}", e)))?;

        let mut defs = TagDefinitions::default();

        for group in TagGroup::ALL {
            let catalog = Self::parse_catalog(&toml_value, group.name())?;
            debug!("Loaded {} {} tag definitions", catalog.len(), group);
            defs.catalogs.insert(group, catalog);
        }

        if let Some(table) = toml_value.get("labels").and_then(|v| v.as_table()) {
            for (tag_name, entries) in table {
                let Some(entries) = entries.as_table() else {
                    return Err(ExifError::InvalidDefinitions(format!(
                        "Label table for {} is not a table",
                        tag_name
                    )));
                };

                let labels = entries
                    .iter()
                    .filter_map(|(raw, label)| label.as_str().map(|l| (raw.clone(), l.to_string())))
                    .collect();
                defs.labels.insert(tag_name.clone(), labels);
            }
        }

        Ok(defs)
    }

    /// Helper to parse a hex-keyed catalog table
    fn parse_catalog(toml_value: &toml::Value, table_name: &str) -> ExifResult<HashMap<u16, String>> {
        let mut catalog = HashMap::new();

        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                let id = parse_tag_id(k).ok_or_else(|| {
                    ExifError::InvalidDefinitions(format!("Bad tag ID '{}' in [{}]", k, table_name))
                })?;
                if let Some(name) = v.as_str() {
                    catalog.insert(id, name.to_string());
                }
            }
        }

        Ok(catalog)
    }

    /// Load tag definitions from a TOML file
    pub fn from_file(path: &str) -> ExifResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Returns the catalog of one group
    pub fn catalog(&self, group: TagGroup) -> Option<&HashMap<u16, String>> {
        self.catalogs.get(&group)
    }

    /// Get a tag name by group and ID
    pub fn tag_name(&self, group: TagGroup, tag_id: u16) -> Option<&str> {
        self.catalogs.get(&group)?.get(&tag_id).map(String::as_str)
    }

    /// Get a tag ID by group and name
    pub fn tag_id(&self, group: TagGroup, name: &str) -> Option<u16> {
        self.catalogs
            .get(&group)?
            .iter()
            .find(|(_, tag_name)| tag_name.as_str() == name)
            .map(|(&id, _)| id)
    }

    /// Whether a tag has a label table at all
    pub fn has_labels(&self, tag_name: &str) -> bool {
        self.labels.contains_key(tag_name)
    }

    /// Get the label for a raw value of an enumerated tag
    pub fn label(&self, tag_name: &str, raw: &str) -> Option<&str> {
        self.labels.get(tag_name)?.get(raw).map(String::as_str)
    }
}

/// Parses "0x0112" or "274"
fn parse_tag_id(key: &str) -> Option<u16> {
    match key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => key.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_decimal_ids() {
        assert_eq!(parse_tag_id("0x0112"), Some(0x0112));
        assert_eq!(parse_tag_id("0XA002"), Some(0xA002));
        assert_eq!(parse_tag_id("274"), Some(274));
        assert_eq!(parse_tag_id("0xZZ"), None);
    }
}
