//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod analyze_command;
pub mod thumbnail_command;
pub mod set_tag_command;

pub use command_traits::{Command, CommandFactory};
pub use analyze_command::AnalyzeCommand;
pub use thumbnail_command::ThumbnailCommand;
pub use set_tag_command::SetTagCommand;

use std::fs;
use std::ops::Range;

use clap::ArgMatches;
use log::debug;

use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::tags::TagDefinitions;
use crate::utils::jpeg_utils;

/// Factory for creating command instances based on CLI arguments
pub struct ExifkitCommandFactory;

impl ExifkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ExifkitCommandFactory
    }
}

impl Default for ExifkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for ExifkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, definitions: &'a TagDefinitions) -> ExifResult<Box<dyn Command + 'a>> {
        if args.get_one::<String>("set").is_some() {
            Ok(Box::new(SetTagCommand::new(args, definitions)?))
        } else if args.get_one::<String>("thumbnail").is_some() {
            Ok(Box::new(ThumbnailCommand::new(args, definitions)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, definitions)?))
        }
    }
}

/// Gets the required input path from the arguments
pub(crate) fn input_path(args: &ArgMatches) -> ExifResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| ExifError::GenericError("Missing input file".to_string()))
}

/// Reads a JPEG file and locates its EXIF segment
pub(crate) fn read_jpeg(path: &str) -> ExifResult<(Vec<u8>, Range<usize>)> {
    let jpeg = fs::read(path)?;
    debug!("Read {} bytes from {}", jpeg.len(), path);

    let range = jpeg_utils::find_exif_segment(&jpeg)
        .ok_or_else(|| ExifError::GenericError(format!("No EXIF segment found in {}", path)))?;
    debug!("EXIF segment at bytes {}..{}", range.start, range.end);

    Ok((jpeg, range))
}
