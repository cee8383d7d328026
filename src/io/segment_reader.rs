//! Random-access reader over an APP1 segment
//!
//! `SegmentReader` provides bounds-checked typed reads at absolute byte
//! offsets, honoring a byte order that can be switched once the TIFF header
//! has been inspected. When the underlying buffer is mutable it also
//! supports same-size scalar writes.

use std::fmt;

use log::trace;

use crate::exif::errors::{ExifError, ExifResult};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::utils::string_utils;

/// Bounds-checked reader (and optional writer) over a segment buffer
pub struct SegmentReader<B> {
    /// Segment bytes, starting at the APP1 marker
    data: B,
    /// Current byte order handler
    handler: Box<dyn ByteOrderHandler>,
}

impl<B: AsRef<[u8]>> SegmentReader<B> {
    /// Creates a reader over the given buffer
    ///
    /// JPEG markers are big-endian, so that is the starting byte order.
    pub fn new(data: B) -> Self {
        SegmentReader {
            data,
            handler: ByteOrder::BigEndian.create_handler(),
        }
    }

    /// Switches the byte order used by all subsequent multi-byte reads and writes
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        trace!("Segment byte order set to {}", byte_order.name());
        self.handler = byte_order.create_handler();
    }

    /// Returns the byte order currently in effect
    pub fn byte_order(&self) -> ByteOrder {
        self.handler.byte_order()
    }

    /// Total length of the segment in bytes
    pub fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    /// Whether the segment is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `offset` addresses a byte inside the segment
    pub fn contains(&self, offset: usize) -> bool {
        offset < self.len()
    }

    /// Borrows `length` bytes starting at `offset`
    pub fn read_range(&self, offset: usize, length: usize) -> ExifResult<&[u8]> {
        let size = self.len();
        offset
            .checked_add(length)
            .and_then(|end| self.data.as_ref().get(offset..end))
            .ok_or(ExifError::OutOfBounds { offset, length, size })
    }

    pub fn read_u8(&self, offset: usize) -> ExifResult<u8> {
        Ok(self.read_range(offset, 1)?[0])
    }

    pub fn read_u16(&self, offset: usize) -> ExifResult<u16> {
        let bytes = self.read_range(offset, 2)?;
        Ok(self.handler.read_u16(bytes))
    }

    pub fn read_u32(&self, offset: usize) -> ExifResult<u32> {
        let bytes = self.read_range(offset, 4)?;
        Ok(self.handler.read_u32(bytes))
    }

    pub fn read_i32(&self, offset: usize) -> ExifResult<i32> {
        let bytes = self.read_range(offset, 4)?;
        Ok(self.handler.read_i32(bytes))
    }

    /// Reads an unsigned rational (numerator, denominator)
    pub fn read_rational(&self, offset: usize) -> ExifResult<(u32, u32)> {
        Ok((self.read_u32(offset)?, self.read_u32(offset + 4)?))
    }

    /// Reads a signed rational (numerator, denominator)
    pub fn read_srational(&self, offset: usize) -> ExifResult<(i32, i32)> {
        Ok((self.read_i32(offset)?, self.read_i32(offset + 4)?))
    }

    /// Reads `length` bytes as text, one character per byte
    pub fn read_text(&self, offset: usize, length: usize) -> ExifResult<String> {
        self.read_range(offset, length).map(string_utils::bytes_to_text)
    }

    /// Releases the reader, handing the buffer back
    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> SegmentReader<B> {
    /// Writes `value` at `offset` using `byte_width` bytes (1, 2 or 4)
    ///
    /// The value must fit in the requested width. Nothing is written when
    /// the range falls outside the segment.
    pub fn write(&mut self, offset: usize, value: u32, byte_width: usize) -> ExifResult<()> {
        let size = self.len();
        let end = offset
            .checked_add(byte_width)
            .filter(|&end| end <= size)
            .ok_or(ExifError::OutOfBounds { offset, length: byte_width, size })?;

        let target = &mut self.data.as_mut()[offset..end];
        match byte_width {
            1 => {
                let byte = u8::try_from(value).map_err(|_| value_too_wide(value, byte_width))?;
                target[0] = byte;
            }
            2 => {
                let short = u16::try_from(value).map_err(|_| value_too_wide(value, byte_width))?;
                self.handler.write_u16(target, short);
            }
            4 => self.handler.write_u32(target, value),
            _ => {
                return Err(ExifError::GenericError(format!(
                    "Unsupported write width: {} bytes",
                    byte_width
                )))
            }
        }

        trace!("Wrote {} ({} bytes) at offset {}", value, byte_width, offset);
        Ok(())
    }
}

fn value_too_wide(value: u32, byte_width: usize) -> ExifError {
    ExifError::GenericError(format!("Value {} does not fit in {} byte(s)", value, byte_width))
}

impl<B: AsRef<[u8]>> fmt::Debug for SegmentReader<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentReader")
            .field("len", &self.len())
            .field("byte_order", &self.byte_order())
            .finish()
    }
}
