//! TIFF header parsing and IFD offset resolution
//!
//! The TIFF header sits right after the "Exif\0\0" identifier. It fixes the
//! byte order for the rest of the segment and points at IFD0, which in turn
//! points at the EXIF and GPS sub-IFDs and, through its next-IFD link, at
//! the thumbnail IFD.

use log::{debug, warn};

use crate::exif::constants::{header, tag_names};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::ifd::{self, IfdDecoder};
use crate::exif::tags::{TagDefinitions, TagGroup};
use crate::exif::types::{TagMap, TagValue};
use crate::io::byte_order::ByteOrder;
use crate::io::segment_reader::SegmentReader;

/// Absolute offsets of the structures found in a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable {
    /// Start of the TIFF header
    pub tiff_header: usize,
    /// Primary image IFD
    pub ifd0: usize,
    /// EXIF sub-IFD
    pub exif_ifd: Option<usize>,
    /// GPS sub-IFD
    pub gps_ifd: Option<usize>,
    /// Thumbnail IFD
    pub ifd1: Option<usize>,
}

impl OffsetTable {
    /// Offset of the IFD holding a tag group, if the segment has one
    pub fn ifd_for(&self, group: TagGroup) -> Option<usize> {
        match group {
            TagGroup::Tiff => Some(self.ifd0),
            TagGroup::Exif => self.exif_ifd,
            TagGroup::Gps => self.gps_ifd,
            TagGroup::Thumbnail => self.ifd1,
        }
    }
}

/// Checks that the segment starts with an APP1 marker and an EXIF identifier
pub fn validate_signature<B: AsRef<[u8]>>(reader: &SegmentReader<B>) -> ExifResult<()> {
    let marker = reader.read_u16(0).map_err(|_| ExifError::InvalidSignature)?;
    let identifier = reader
        .read_range(header::IDENTIFIER_OFFSET, header::IDENTIFIER.len())
        .map_err(|_| ExifError::InvalidSignature)?;

    if marker != header::APP1_MARKER || !identifier.eq_ignore_ascii_case(header::IDENTIFIER) {
        debug!("Rejecting segment: marker={:#06x}, identifier={:?}", marker, identifier);
        return Err(ExifError::InvalidSignature);
    }

    Ok(())
}

/// Parses the TIFF header and locates every IFD
///
/// Switches `reader` to the detected byte order, then decodes IFD0 with the
/// primary catalog. The sub-IFD pointers are moved out of the decoded tags
/// into the returned offset table; the remaining tags are the primary group.
pub fn resolve_offsets<B: AsRef<[u8]>>(
    reader: &mut SegmentReader<B>,
    definitions: &TagDefinitions,
) -> ExifResult<(OffsetTable, TagMap)> {
    let base = header::TIFF_HEADER_BASE;

    let marker = reader.read_u16(base)?;
    reader.set_byte_order(ByteOrder::from_marker(marker));
    debug!("Detected byte order: {}", reader.byte_order().name());

    let magic = reader.read_u16(base + 2)?;
    if magic != header::TIFF_MAGIC {
        return Err(ExifError::InvalidMagic(magic));
    }

    let ifd0 = base + reader.read_u32(base + 4)? as usize;
    debug!("IFD0 offset: {}", ifd0);

    let reader = &*reader;
    let mut primary = IfdDecoder::new(reader, base, definitions).decode(ifd0, TagGroup::Tiff)?;

    let exif_ifd = take_pointer(&mut primary, tag_names::EXIF_IFD_POINTER, base, reader);
    let gps_ifd = take_pointer(&mut primary, tag_names::GPS_INFO_IFD_POINTER, base, reader);

    let ifd1 = match ifd::read_next_ifd_pointer(reader, ifd0)? {
        0 => None,
        pointer => checked_offset(base + pointer as usize, "IFD1", reader),
    };

    let offsets = OffsetTable {
        tiff_header: base,
        ifd0,
        exif_ifd,
        gps_ifd,
        ifd1,
    };
    debug!("Resolved offsets: {:?}", offsets);

    Ok((offsets, primary))
}

/// Removes a sub-IFD pointer tag and turns it into an absolute offset
fn take_pointer<B: AsRef<[u8]>>(
    tags: &mut TagMap,
    name: &str,
    base: usize,
    reader: &SegmentReader<B>,
) -> Option<usize> {
    match tags.remove(name)? {
        TagValue::List(_) | TagValue::Text(_) | TagValue::Rational(_) => {
            warn!("{} has a non-integer value, ignoring it", name);
            None
        }
        value => {
            let pointer = value.as_u32()?;
            checked_offset(base + pointer as usize, name, reader)
        }
    }
}

fn checked_offset<B: AsRef<[u8]>>(offset: usize, what: &str, reader: &SegmentReader<B>) -> Option<usize> {
    if reader.contains(offset) {
        Some(offset)
    } else {
        warn!("{} offset {} lies outside the segment ({} bytes)", what, offset, reader.len());
        None
    }
}
