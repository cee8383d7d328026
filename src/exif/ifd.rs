//! Image File Directory (IFD) decoding
//!
//! An IFD is a 2-byte entry count followed by 12-byte entries and a 4-byte
//! pointer to the next IFD. Each entry holds a tag ID, a field type, a value
//! count and a 4-byte field that carries the value itself when it fits, or
//! an offset (relative to the TIFF header) to where the value is stored.

use log::{debug, trace};

use crate::exif::constants::ifd;
use crate::exif::errors::{ExifError, ExifResult};
use crate::exif::tags::{TagDefinitions, TagGroup};
use crate::exif::types::{FieldType, TagMap, TagValue};
use crate::io::segment_reader::SegmentReader;
use crate::utils::string_utils;

/// Represents an entry in an Image File Directory (IFD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Absolute offset of the entry in the segment
    pub offset: usize,
    /// Tag identifier
    pub tag: u16,
    /// Raw field type code
    pub field_type: u16,
    /// Number of values
    pub count: u32,
}

impl IfdEntry {
    /// Reads the 12-byte entry starting at `offset`
    pub fn read<B: AsRef<[u8]>>(reader: &SegmentReader<B>, offset: usize) -> ExifResult<Self> {
        Ok(IfdEntry {
            offset,
            tag: reader.read_u16(offset)?,
            field_type: reader.read_u16(offset + 2)?,
            count: reader.read_u32(offset + 4)?,
        })
    }

    /// Absolute offset of the 4-byte value field
    pub fn value_field_offset(&self) -> usize {
        self.offset + ifd::VALUE_FIELD_OFFSET
    }
}

/// Reads the number of entries in the IFD at `ifd_offset`
pub fn read_entry_count<B: AsRef<[u8]>>(reader: &SegmentReader<B>, ifd_offset: usize) -> ExifResult<usize> {
    reader.read_u16(ifd_offset).map(usize::from)
}

/// Absolute offset of entry `index` of the IFD at `ifd_offset`
pub fn entry_offset(ifd_offset: usize, index: usize) -> usize {
    ifd_offset + ifd::COUNT_SIZE + ifd::ENTRY_SIZE * index
}

/// Reads the pointer to the next IFD, stored right after the entry list
///
/// The returned value is relative to the TIFF header; 0 means there is none.
pub fn read_next_ifd_pointer<B: AsRef<[u8]>>(reader: &SegmentReader<B>, ifd_offset: usize) -> ExifResult<u32> {
    let count = read_entry_count(reader, ifd_offset)?;
    reader.read_u32(entry_offset(ifd_offset, count))
}

/// Finds the entry with tag ID `tag` in the IFD at `ifd_offset`
pub fn find_entry<B: AsRef<[u8]>>(
    reader: &SegmentReader<B>,
    ifd_offset: usize,
    tag: u16,
) -> ExifResult<Option<IfdEntry>> {
    let count = read_entry_count(reader, ifd_offset)?;

    for index in 0..count {
        let offset = entry_offset(ifd_offset, index);
        if reader.read_u16(offset)? == tag {
            return IfdEntry::read(reader, offset).map(Some);
        }
    }

    Ok(None)
}

/// Decodes IFDs against a set of tag definitions
pub struct IfdDecoder<'a, B> {
    reader: &'a SegmentReader<B>,
    /// Absolute offset of the TIFF header; indirect values are relative to it
    tiff_base: usize,
    definitions: &'a TagDefinitions,
}

impl<'a, B: AsRef<[u8]>> IfdDecoder<'a, B> {
    pub fn new(reader: &'a SegmentReader<B>, tiff_base: usize, definitions: &'a TagDefinitions) -> Self {
        IfdDecoder {
            reader,
            tiff_base,
            definitions,
        }
    }

    /// Decodes every entry of the IFD at `ifd_offset` that `group` catalogs
    ///
    /// Entries whose tag is not in the catalog are skipped without touching
    /// their value. Enumerated tags whose raw value has no label are left
    /// out of the result.
    pub fn decode(&self, ifd_offset: usize, group: TagGroup) -> ExifResult<TagMap> {
        let count = read_entry_count(self.reader, ifd_offset)?;
        debug!("Decoding {} IFD at offset {} ({} entries)", group, ifd_offset, count);

        let mut tags = TagMap::new();

        for index in 0..count {
            let offset = entry_offset(ifd_offset, index);
            let tag = self.reader.read_u16(offset)?;

            let Some(name) = self.definitions.tag_name(group, tag) else {
                trace!("Skipping tag {:#06x} in {} IFD", tag, group);
                continue;
            };

            let entry = IfdEntry::read(self.reader, offset)?;
            let value = self.decode_value(&entry)?;
            trace!("Tag {:#06x} ({}) = {:?}", tag, name, value);

            if self.definitions.has_labels(name) && !value.is_list() {
                let label = value
                    .label_key()
                    .and_then(|key| self.definitions.label(name, &key));
                match label {
                    Some(label) => {
                        tags.insert(name.to_string(), TagValue::Text(label.to_string()));
                    }
                    None => debug!("No label for {} = {}, dropping it", name, value),
                }
                continue;
            }

            tags.insert(name.to_string(), value);
        }

        Ok(tags)
    }

    /// Decodes the value of a single entry
    pub fn decode_value(&self, entry: &IfdEntry) -> ExifResult<TagValue> {
        let field_type = FieldType::from_code(entry.field_type)?;
        let count = entry.count as usize;
        let location = self.value_location(entry, field_type)?;

        // Reject impossible counts before allocating anything
        let total = field_type
            .size()
            .checked_mul(count)
            .ok_or(ExifError::OutOfBounds { offset: location, length: usize::MAX, size: self.reader.len() })?;
        self.reader.read_range(location, total)?;

        if field_type == FieldType::Ascii {
            let bytes = self.reader.read_range(location, count)?;
            let text = string_utils::bytes_to_text(string_utils::trim_trailing_nulls(bytes));
            return Ok(TagValue::Text(text));
        }

        let mut values = Vec::with_capacity(count);
        for index in 0..count {
            values.push(self.read_scalar(field_type, location + index * field_type.size())?);
        }

        if values.len() == 1 {
            Ok(values.remove(0))
        } else {
            Ok(TagValue::List(values))
        }
    }

    /// Resolves where the value of `entry` is stored
    fn value_location(&self, entry: &IfdEntry, field_type: FieldType) -> ExifResult<usize> {
        let field = entry.value_field_offset();

        if field_type.is_inline(entry.count as usize) {
            Ok(field)
        } else {
            let relative = self.reader.read_u32(field)? as usize;
            Ok(self.tiff_base + relative)
        }
    }

    fn read_scalar(&self, field_type: FieldType, offset: usize) -> ExifResult<TagValue> {
        let value = match field_type {
            FieldType::Byte | FieldType::Undefined => TagValue::Byte(self.reader.read_u8(offset)?),
            FieldType::Ascii => TagValue::Text((self.reader.read_u8(offset)? as char).to_string()),
            FieldType::Short => TagValue::Short(self.reader.read_u16(offset)?),
            FieldType::Long => TagValue::Long(self.reader.read_u32(offset)?),
            FieldType::SignedLong => TagValue::SignedLong(self.reader.read_i32(offset)?),
            FieldType::Rational => {
                let (numerator, denominator) = self.reader.read_rational(offset)?;
                TagValue::Rational(numerator as f64 / denominator as f64)
            }
            FieldType::SignedRational => {
                let (numerator, denominator) = self.reader.read_srational(offset)?;
                TagValue::Rational(numerator as f64 / denominator as f64)
            }
        };

        Ok(value)
    }
}
