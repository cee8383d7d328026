//! EXIF segment parsing module
//!
//! This module provides structures and functions for decoding the TIFF
//! structure carried in a JPEG APP1 segment and for patching a small set of
//! scalar tags in place.

pub mod errors;
pub mod ifd;
pub mod types;
pub mod header;
pub mod parser;
pub mod tags;
pub(crate) mod constants;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{ExifError, ExifResult};
pub use header::OffsetTable;
pub use ifd::{IfdDecoder, IfdEntry};
pub use parser::ExifParser;
pub use tags::{TagDefinitions, TagGroup};
pub use types::{FieldType, TagMap, TagValue};
