//! EXIF format constants
//!
//! Constants used in APP1 segment and TIFF structure parsing.

/// Segment and TIFF header layout
pub mod header {
    /// APP1 marker, first two bytes of the segment
    pub const APP1_MARKER: u16 = 0xFFE1;
    /// Offset of the "Exif\0" identifier (after marker and length)
    pub const IDENTIFIER_OFFSET: usize = 4;
    /// Identifier compared case-insensitively against the segment
    pub const IDENTIFIER: &[u8] = b"EXIF\0";
    /// Start of the TIFF header: marker (2) + length (2) + "Exif\0\0" (6)
    pub const TIFF_HEADER_BASE: usize = 10;
    /// "II"
    pub const LITTLE_ENDIAN_MARKER: u16 = 0x4949;
    /// "MM"
    pub const BIG_ENDIAN_MARKER: u16 = 0x4D4D;
    /// TIFF magic number
    pub const TIFF_MAGIC: u16 = 0x002A;
}

/// IFD layout
pub mod ifd {
    /// Size of the entry count field
    pub const COUNT_SIZE: usize = 2;
    /// Size of one directory entry
    pub const ENTRY_SIZE: usize = 12;
    /// Offset of the value field inside an entry
    pub const VALUE_FIELD_OFFSET: usize = 8;
    /// Bytes available for inline values
    pub const INLINE_CAPACITY: usize = 4;
}

/// IFD field type codes
pub mod field_types {
    pub const BYTE: u16 = 1;
    pub const ASCII: u16 = 2;
    pub const SHORT: u16 = 3;
    pub const LONG: u16 = 4;
    pub const RATIONAL: u16 = 5;
    pub const UNDEFINED: u16 = 7;
    pub const SLONG: u16 = 9;
    pub const SRATIONAL: u16 = 10;
}

/// Tag names with special handling
pub mod tag_names {
    pub const EXIF_IFD_POINTER: &str = "ExifIFDPointer";
    pub const GPS_INFO_IFD_POINTER: &str = "GPSInfoIFDPointer";
    pub const EXIF_VERSION: &str = "ExifVersion";
    pub const GPS_VERSION_ID: &str = "GPSVersionID";
    pub const JPEG_INTERCHANGE_FORMAT: &str = "JPEGInterchangeFormat";
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: &str = "JPEGInterchangeFormatLength";
    pub const PIXEL_X_DIMENSION: &str = "PixelXDimension";
    pub const PIXEL_Y_DIMENSION: &str = "PixelYDimension";
}
