//! Byte order handling for EXIF data
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading and patching
//! the TIFF structure embedded in an APP1 segment.

use byteorder::{BigEndian, ByteOrder as EndianRead, LittleEndian};
use log::warn;

use crate::exif::constants::header;

/// Represents the byte order of the TIFF structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Interprets the 2-byte order marker at the start of a TIFF header
    ///
    /// Only "II" selects little-endian. Anything else is read as big-endian,
    /// which is what cameras writing a damaged marker almost always mean.
    pub fn from_marker(marker: u16) -> Self {
        match marker {
            header::LITTLE_ENDIAN_MARKER => ByteOrder::LittleEndian,
            header::BIG_ENDIAN_MARKER => ByteOrder::BigEndian,
            other => {
                warn!("Unexpected byte order marker {:#06x}, assuming big endian", other);
                ByteOrder::BigEndian
            }
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
///
/// Every method works on a slice that is already known to be long enough;
/// bounds are checked by the caller.
pub trait ByteOrderHandler: Send + Sync {
    /// The byte order this handler implements
    fn byte_order(&self) -> ByteOrder;

    /// Read a u16 value
    fn read_u16(&self, buf: &[u8]) -> u16;

    /// Read a u32 value
    fn read_u32(&self, buf: &[u8]) -> u32;

    /// Read an i32 value
    fn read_i32(&self, buf: &[u8]) -> i32;

    /// Write a u16 value
    fn write_u16(&self, buf: &mut [u8], value: u16);

    /// Write a u32 value
    fn write_u32(&self, buf: &mut [u8], value: u32);
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn byte_order(&self) -> ByteOrder {
        ByteOrder::LittleEndian
    }

    fn read_u16(&self, buf: &[u8]) -> u16 {
        LittleEndian::read_u16(buf)
    }

    fn read_u32(&self, buf: &[u8]) -> u32 {
        LittleEndian::read_u32(buf)
    }

    fn read_i32(&self, buf: &[u8]) -> i32 {
        LittleEndian::read_i32(buf)
    }

    fn write_u16(&self, buf: &mut [u8], value: u16) {
        LittleEndian::write_u16(buf, value)
    }

    fn write_u32(&self, buf: &mut [u8], value: u32) {
        LittleEndian::write_u32(buf, value)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn byte_order(&self) -> ByteOrder {
        ByteOrder::BigEndian
    }

    fn read_u16(&self, buf: &[u8]) -> u16 {
        BigEndian::read_u16(buf)
    }

    fn read_u32(&self, buf: &[u8]) -> u32 {
        BigEndian::read_u32(buf)
    }

    fn read_i32(&self, buf: &[u8]) -> i32 {
        BigEndian::read_i32(buf)
    }

    fn write_u16(&self, buf: &mut [u8], value: u16) {
        BigEndian::write_u16(buf, value)
    }

    fn write_u32(&self, buf: &mut [u8], value: u32) {
        BigEndian::write_u32(buf, value)
    }
}
