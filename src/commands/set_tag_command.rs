//! Tag rewrite command
//!
//! Overwrites a whitelisted scalar tag in the EXIF segment and saves the
//! patched JPEG. The segment is never resized.

use std::fs;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_path, read_jpeg};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::parser::ExifParser;
use crate::exif::tags::{TagDefinitions, TagGroup};

/// A parsed `GROUP:TAG=VALUE` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAssignment {
    pub group: TagGroup,
    pub tag: String,
    pub value: u32,
}

impl TagAssignment {
    /// Parses `GROUP:TAG=VALUE`; the group defaults to `exif`
    pub fn parse(text: &str) -> ExifResult<Self> {
        let invalid = || ExifError::GenericError(format!("Invalid assignment '{}', expected GROUP:TAG=VALUE", text));

        let (target, value) = text.split_once('=').ok_or_else(invalid)?;
        let (group, tag) = match target.split_once(':') {
            Some((group, tag)) => (TagGroup::from_name(group.trim()).ok_or_else(invalid)?, tag),
            None => (TagGroup::Exif, target),
        };
        let value = value.trim().parse::<u32>().map_err(|_| invalid())?;

        let tag = tag.trim();
        if tag.is_empty() {
            return Err(invalid());
        }

        Ok(TagAssignment { group, tag: tag.to_string(), value })
    }
}

/// Command for overwriting a scalar tag
pub struct SetTagCommand<'a> {
    input_file: String,
    output_file: String,
    assignment: TagAssignment,
    definitions: &'a TagDefinitions,
}

impl<'a> SetTagCommand<'a> {
    /// Create a new set command
    pub fn new(args: &ArgMatches, definitions: &'a TagDefinitions) -> ExifResult<Self> {
        let assignment = args.get_one::<String>("set")
            .ok_or_else(|| ExifError::GenericError("Missing tag assignment".to_string()))
            .and_then(|text| TagAssignment::parse(text))?;

        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| ExifError::GenericError("--set requires --output".to_string()))?
            .clone();

        Ok(SetTagCommand {
            input_file: input_path(args)?,
            output_file,
            assignment,
            definitions,
        })
    }
}

impl<'a> Command for SetTagCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        let (mut jpeg, range) = read_jpeg(&self.input_file)?;
        let TagAssignment { group, tag, value } = &self.assignment;

        let mut parser = ExifParser::with_definitions(&mut jpeg[range], self.definitions)?;
        if !parser.set_scalar_tag(*group, tag, *value) {
            return Err(ExifError::GenericError(format!("Could not set {}:{} to {}", group, tag, value)));
        }
        parser.release();

        fs::write(&self.output_file, &jpeg)?;
        info!("Wrote patched JPEG to {}", self.output_file);
        println!("Set {}:{} = {}, written to {}", group, tag, value, self.output_file);

        Ok(())
    }
}
