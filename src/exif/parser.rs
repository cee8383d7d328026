//! EXIF segment parser
//!
//! `ExifParser` validates an APP1 segment, resolves its IFD offsets once and
//! then decodes the primary, EXIF, GPS and thumbnail groups on demand. A
//! narrow set of scalar tags can be overwritten in place when the parser
//! owns or mutably borrows the segment.

use std::fmt;

use log::{debug, info, warn};

use crate::exif::constants::{ifd as ifd_layout, tag_names};
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::header::{self, OffsetTable};
use crate::exif::ifd::{self, IfdDecoder, IfdEntry};
use crate::exif::tags::{self, TagDefinitions, TagGroup};
use crate::exif::types::{FieldType, TagMap, TagValue};
use crate::io::byte_order::ByteOrder;
use crate::io::segment_reader::SegmentReader;

/// Tags that may be overwritten in place
const WRITABLE_TAGS: [(TagGroup, &str); 2] = [
    (TagGroup::Exif, tag_names::PIXEL_X_DIMENSION),
    (TagGroup::Exif, tag_names::PIXEL_Y_DIMENSION),
];

/// Parser for one APP1 EXIF segment
///
/// `B` is the segment buffer: a shared slice for read-only use, or a mutable
/// slice or owned vector when tags are to be rewritten.
pub struct ExifParser<'d, B> {
    reader: SegmentReader<B>,
    definitions: &'d TagDefinitions,
    offsets: OffsetTable,
    primary: TagMap,
}

impl<B: AsRef<[u8]>> ExifParser<'static, B> {
    /// Creates a parser using the built-in tag definitions
    pub fn new(segment: B) -> ExifResult<Self> {
        ExifParser::with_definitions(segment, tags::default_definitions())
    }
}

impl<'d, B: AsRef<[u8]>> ExifParser<'d, B> {
    /// Creates a parser using custom tag definitions
    ///
    /// Fails if the segment is not an APP1 EXIF segment or its TIFF header
    /// or primary IFD is malformed.
    pub fn with_definitions(segment: B, definitions: &'d TagDefinitions) -> ExifResult<Self> {
        let mut reader = SegmentReader::new(segment);
        header::validate_signature(&reader)?;

        let (offsets, primary) = header::resolve_offsets(&mut reader, definitions)?;
        info!(
            "Parsed EXIF segment: {} primary tags, exif={}, gps={}, thumbnail={}",
            primary.len(),
            offsets.exif_ifd.is_some(),
            offsets.gps_ifd.is_some(),
            offsets.ifd1.is_some()
        );

        Ok(ExifParser {
            reader,
            definitions,
            offsets,
            primary,
        })
    }

    /// Resolved IFD offsets
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Byte order of the TIFF structure
    pub fn byte_order(&self) -> ByteOrder {
        self.reader.byte_order()
    }

    /// Primary image tags from IFD0, without the sub-IFD pointers
    pub fn primary(&self) -> &TagMap {
        &self.primary
    }

    /// Tags of the EXIF sub-IFD, or `None` if absent or unreadable
    pub fn exif(&self) -> Option<TagMap> {
        let mut exif = self.decode_group(TagGroup::Exif)?;

        let version = exif.get(tag_names::EXIF_VERSION).and_then(TagValue::as_list);
        if let Some(text) = version.and_then(bytes_as_text) {
            exif.insert(tag_names::EXIF_VERSION.to_string(), TagValue::Text(text));
        }

        Some(exif)
    }

    /// Tags of the GPS sub-IFD, or `None` if absent or unreadable
    pub fn gps(&self) -> Option<TagMap> {
        let mut gps = self.decode_group(TagGroup::Gps)?;

        if let Some(TagValue::List(parts)) = gps.get(tag_names::GPS_VERSION_ID) {
            let dotted = parts.iter().map(ToString::to_string).collect::<Vec<_>>().join(".");
            gps.insert(tag_names::GPS_VERSION_ID.to_string(), TagValue::Text(dotted));
        }

        Some(gps)
    }

    /// Embedded JPEG thumbnail, or `None` if the segment has no usable one
    pub fn thumbnail(&self) -> Option<&[u8]> {
        let tags = self.decode_group(TagGroup::Thumbnail)?;

        let start = tags.get(tag_names::JPEG_INTERCHANGE_FORMAT).and_then(TagValue::as_u32);
        let length = tags.get(tag_names::JPEG_INTERCHANGE_FORMAT_LENGTH).and_then(TagValue::as_u32);
        let (Some(start), Some(length)) = (start, length) else {
            debug!("Thumbnail IFD lacks offset or length");
            return None;
        };

        let offset = self.offsets.tiff_header + start as usize;
        match self.reader.read_range(offset, length as usize) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Ignoring thumbnail: {}", e);
                None
            }
        }
    }

    /// Decodes one group, downgrading failures to `None`
    fn decode_group(&self, group: TagGroup) -> Option<TagMap> {
        let offset = self.offsets.ifd_for(group)?;
        let decoder = IfdDecoder::new(&self.reader, self.offsets.tiff_header, self.definitions);

        match decoder.decode(offset, group) {
            Ok(tags) => Some(tags),
            Err(e) => {
                warn!("Failed to decode {} IFD at offset {}: {}", group, offset, e);
                None
            }
        }
    }

    /// Releases the parser, handing the segment buffer back
    pub fn release(self) -> B {
        debug!("Releasing EXIF parser");
        self.reader.into_inner()
    }
}

impl<'d, B: AsRef<[u8]> + AsMut<[u8]>> ExifParser<'d, B> {
    /// Overwrites a whitelisted scalar tag in place
    ///
    /// Returns false, leaving the segment untouched, when the tag is not
    /// writable, not present, not a single inline SHORT or LONG, or the
    /// value does not fit.
    pub fn set_scalar_tag(&mut self, group: TagGroup, name: &str, value: u32) -> bool {
        match self.try_set_scalar_tag(group, name, value) {
            Ok(()) => {
                info!("Set {} {} to {}", group, name, value);
                true
            }
            Err(e) => {
                debug!("Not setting {} {}: {}", group, name, e);
                false
            }
        }
    }

    /// Overwrites a whitelisted tag of the EXIF group
    pub fn set_exif(&mut self, name: &str, value: u32) -> bool {
        self.set_scalar_tag(TagGroup::Exif, name, value)
    }

    fn try_set_scalar_tag(&mut self, group: TagGroup, name: &str, value: u32) -> ExifResult<()> {
        if !WRITABLE_TAGS.iter().any(|&(g, n)| g == group && n == name) {
            return Err(ExifError::GenericError(format!("{} is not writable", name)));
        }

        let tag = self
            .definitions
            .tag_id(group, name)
            .ok_or_else(|| ExifError::GenericError(format!("{} is not in the {} catalog", name, group)))?;
        let ifd_offset = self
            .offsets
            .ifd_for(group)
            .ok_or_else(|| ExifError::GenericError(format!("Segment has no {} IFD", group)))?;
        let entry = ifd::find_entry(&self.reader, ifd_offset, tag)?
            .ok_or_else(|| ExifError::GenericError(format!("{} not present", name)))?;

        self.write_inline_scalar(&entry, value)
    }

    /// Writes a single SHORT or LONG into the entry's 4-byte value field
    fn write_inline_scalar(&mut self, entry: &IfdEntry, value: u32) -> ExifResult<()> {
        if entry.count != 1 {
            return Err(ExifError::GenericError(format!("Tag has {} values", entry.count)));
        }

        let field = entry.value_field_offset();
        self.reader.read_range(field, ifd_layout::INLINE_CAPACITY)?;

        match FieldType::from_code(entry.field_type)? {
            FieldType::Long => self.reader.write(field, value, ifd_layout::INLINE_CAPACITY),
            FieldType::Short => {
                if value > u16::MAX as u32 {
                    return Err(ExifError::GenericError(format!("{} does not fit in a SHORT", value)));
                }
                self.reader.write(field, value, 2)?;
                self.reader.write(field + 2, 0, 2)
            }
            other => Err(ExifError::GenericError(format!("Cannot overwrite a {} value", other.name()))),
        }
    }
}

impl<'d, B: AsRef<[u8]>> fmt::Debug for ExifParser<'d, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExifParser")
            .field("reader", &self.reader)
            .field("offsets", &self.offsets)
            .field("primary", &self.primary.len())
            .finish()
    }
}

/// Reinterprets a list of bytes as character codes
fn bytes_as_text(values: &[TagValue]) -> Option<String> {
    values
        .iter()
        .map(|value| match value {
            TagValue::Byte(b) => Some(*b as char),
            _ => None,
        })
        .collect()
}
