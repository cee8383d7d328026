//! EXIF structure analysis command
//!
//! This module implements the command for decoding and displaying
//! every tag group of a JPEG's EXIF segment.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_path, read_jpeg};
use crate::exif::errors::ExifResult;
use crate::exif::parser::ExifParser;
use crate::exif::tags::TagDefinitions;
use crate::exif::types::TagMap;
use crate::utils::format_utils::{format_offset, format_tag_lines};

/// Command for analyzing the EXIF segment of a JPEG file
pub struct AnalyzeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Whether to show segment layout details
    verbose: bool,
    /// Tag definitions used for decoding
    definitions: &'a TagDefinitions,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `definitions` - Tag definitions used for decoding
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, definitions: &'a TagDefinitions) -> ExifResult<Self> {
        Ok(AnalyzeCommand {
            input_file: input_path(args)?,
            verbose: args.get_flag("verbose"),
            definitions,
        })
    }

    /// Prints one tag group, or a note that the segment has none
    fn display_group(&self, title: &str, tags: Option<&TagMap>) {
        println!("\n{}:", title);
        match tags {
            Some(tags) if !tags.is_empty() => {
                for line in format_tag_lines(tags) {
                    println!("  {}", line);
                }
            }
            Some(_) => println!("  (no known tags)"),
            None => println!("  not present"),
        }
    }

    /// Prints byte order and IFD offsets
    fn display_layout<B: AsRef<[u8]>>(&self, parser: &ExifParser<'_, B>) {
        let offsets = parser.offsets();
        println!("  Byte order: {}", parser.byte_order().name());
        println!("  TIFF header offset: {}", offsets.tiff_header);
        println!("  IFD0 offset: {}", offsets.ifd0);
        println!("  EXIF IFD offset: {}", format_offset(offsets.exif_ifd));
        println!("  GPS IFD offset: {}", format_offset(offsets.gps_ifd));
        println!("  IFD1 offset: {}", format_offset(offsets.ifd1));
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> ExifResult<()> {
        info!("Analyzing EXIF data of {}", self.input_file);

        let (jpeg, range) = read_jpeg(&self.input_file)?;
        let segment = &jpeg[range.clone()];
        let parser = ExifParser::with_definitions(segment, self.definitions)?;

        println!("EXIF Analysis Results:");
        println!("  File: {}", self.input_file);
        println!("  Segment: bytes {}..{} ({} bytes)", range.start, range.end, segment.len());
        if self.verbose {
            self.display_layout(&parser);
        }

        self.display_group("Primary image", Some(parser.primary()));
        self.display_group("EXIF", parser.exif().as_ref());
        self.display_group("GPS", parser.gps().as_ref());

        match parser.thumbnail() {
            Some(thumbnail) => println!("\nThumbnail: {} bytes", thumbnail.len()),
            None => println!("\nThumbnail: not present"),
        }

        info!("Analysis completed successfully");
        Ok(())
    }
}
