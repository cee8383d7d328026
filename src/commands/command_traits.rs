//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use crate::exif::errors::ExifResult;
use crate::exif::tags::TagDefinitions;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command
    fn execute(&self) -> ExifResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `definitions` - Tag definitions used to decode the input
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches, definitions: &'a TagDefinitions) -> ExifResult<Box<dyn Command + 'a>>;
}
