use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use exifkit::exif::tags::{self, TagDefinitions};
use exifkit::utils::logger;
use exifkit::commands::{CommandFactory, ExifkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("exifkit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Decode and patch EXIF metadata in JPEG files")
        .arg(
            Arg::new("input")
                .help("Input JPEG file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tags")
                .long("tags")
                .help("Tag definition file to use instead of the built-in one")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("thumbnail")
                .long("thumbnail")
                .help("Extract the embedded thumbnail to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("Overwrite a scalar tag, e.g. exif:PixelXDimension=1024")
                .value_name("GROUP:TAG=VALUE")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output JPEG file for --set")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    logger::init_global_logger(matches.get_flag("verbose"));

    let custom_definitions = match matches.get_one::<String>("tags") {
        Some(path) => match TagDefinitions::from_file(path) {
            Ok(defs) => Some(defs),
            Err(e) => {
                eprintln!("Error loading tag definitions: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };
    let definitions = custom_definitions.as_ref().unwrap_or_else(|| tags::default_definitions());

    let factory = ExifkitCommandFactory::new();

    let command_result = factory.create_command(&matches, definitions);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
