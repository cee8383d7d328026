//! Custom error types for EXIF processing

use std::fmt;
use std::io;

/// EXIF-specific error types
#[derive(Debug)]
pub enum ExifError {
    /// I/O error
    IoError(io::Error),
    /// Segment does not start with an APP1 marker followed by "Exif\0"
    InvalidSignature,
    /// TIFF header magic is not 42
    InvalidMagic(u16),
    /// Unsupported IFD field type
    UnsupportedFieldType(u16),
    /// Read or write outside the segment
    OutOfBounds {
        offset: usize,
        length: usize,
        size: usize,
    },
    /// Tag definition file could not be parsed
    InvalidDefinitions(String),
    /// Generic error with message
    GenericError(String),
}

impl ExifError {
    /// Whether this error means the metadata itself is malformed
    ///
    /// Signature, magic, field type and bounds failures are all the same
    /// kind from a caller's point of view: the segment cannot be trusted.
    pub fn is_invalid_metadata(&self) -> bool {
        matches!(
            self,
            ExifError::InvalidSignature
                | ExifError::InvalidMagic(_)
                | ExifError::UnsupportedFieldType(_)
                | ExifError::OutOfBounds { .. }
        )
    }
}

impl fmt::Display for ExifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExifError::IoError(e) => write!(f, "I/O error: {}", e),
            ExifError::InvalidSignature => write!(f, "Invalid metadata: not an APP1 EXIF segment"),
            ExifError::InvalidMagic(v) => write!(f, "Invalid metadata: bad TIFF magic {:#06x}", v),
            ExifError::UnsupportedFieldType(ft) => {
                write!(f, "Invalid metadata: unsupported field type {}", ft)
            }
            ExifError::OutOfBounds { offset, length, size } => write!(
                f,
                "Invalid metadata: {} byte(s) at offset {} exceed segment size {}",
                length, offset, size
            ),
            ExifError::InvalidDefinitions(msg) => write!(f, "Invalid tag definitions: {}", msg),
            ExifError::GenericError(msg) => write!(f, "EXIF error: {}", msg),
        }
    }
}

impl std::error::Error for ExifError {}

impl From<io::Error> for ExifError {
    fn from(error: io::Error) -> Self {
        ExifError::IoError(error)
    }
}

/// Result type for EXIF operations
pub type ExifResult<T> = Result<T, ExifError>;

impl From<String> for ExifError {
    fn from(msg: String) -> Self {
        ExifError::GenericError(msg)
    }
}
