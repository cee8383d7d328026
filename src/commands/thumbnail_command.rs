//! Thumbnail extraction command
//!
//! Writes the JPEG thumbnail embedded in IFD1 to a separate file.

use std::fs;

use clap::ArgMatches;
use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::commands::{input_path, read_jpeg};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::parser::ExifParser;
use crate::exif::tags::TagDefinitions;

/// Command for extracting the embedded thumbnail
pub struct ThumbnailCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Where to write the thumbnail
    output_file: String,
    /// Tag definitions used for decoding
    definitions: &'a TagDefinitions,
}

impl<'a> ThumbnailCommand<'a> {
    /// Create a new thumbnail command
    pub fn new(args: &ArgMatches, definitions: &'a TagDefinitions) -> ExifResult<Self> {
        let output_file = args.get_one::<String>("thumbnail")
            .ok_or_else(|| ExifError::GenericError("Missing thumbnail output file".to_string()))?
            .clone();

        Ok(ThumbnailCommand {
            input_file: input_path(args)?,
            output_file,
            definitions,
        })
    }
}

impl<'a> Command for ThumbnailCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        let (jpeg, range) = read_jpeg(&self.input_file)?;
        let parser = ExifParser::with_definitions(&jpeg[range], self.definitions)?;

        let thumbnail = parser.thumbnail()
            .ok_or_else(|| ExifError::GenericError(format!("{} has no embedded thumbnail", self.input_file)))?;

        match image::load_from_memory(thumbnail) {
            Ok(img) => println!("Thumbnail: {}x{}, {} bytes", img.width(), img.height(), thumbnail.len()),
            Err(e) => {
                warn!("Thumbnail could not be decoded: {}", e);
                println!("Thumbnail: {} bytes (not decodable)", thumbnail.len());
            }
        }

        fs::write(&self.output_file, thumbnail)?;
        info!("Thumbnail written to {}", self.output_file);
        println!("Written to {}", self.output_file);

        Ok(())
    }
}
