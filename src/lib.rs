pub mod io;
pub mod exif;
pub mod utils;
pub mod commands;

pub use exif::{ExifError, ExifParser, ExifResult, TagGroup, TagMap, TagValue};
pub use utils::jpeg_utils::find_exif_segment;
