//! Core EXIF data structures

use std::collections::HashMap;
use std::fmt;

use crate::exif::constants::{field_types, ifd};
use crate::exif::errors::{ExifError, ExifResult};

/// Decoded tags of one IFD, keyed by tag name
pub type TagMap = HashMap<String, TagValue>;

/// The field types this decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Byte,
    Undefined,
    Ascii,
    Short,
    Long,
    Rational,
    SignedLong,
    SignedRational,
}

impl FieldType {
    /// Maps a raw type code to a field type
    pub fn from_code(code: u16) -> ExifResult<Self> {
        match code {
            field_types::BYTE => Ok(FieldType::Byte),
            field_types::UNDEFINED => Ok(FieldType::Undefined),
            field_types::ASCII => Ok(FieldType::Ascii),
            field_types::SHORT => Ok(FieldType::Short),
            field_types::LONG => Ok(FieldType::Long),
            field_types::RATIONAL => Ok(FieldType::Rational),
            field_types::SLONG => Ok(FieldType::SignedLong),
            field_types::SRATIONAL => Ok(FieldType::SignedRational),
            _ => Err(ExifError::UnsupportedFieldType(code)),
        }
    }

    /// Size in bytes of a single value of this type
    pub fn size(&self) -> usize {
        match self {
            FieldType::Byte | FieldType::Undefined | FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long | FieldType::SignedLong => 4,
            FieldType::Rational | FieldType::SignedRational => 8,
        }
    }

    /// Whether `count` values of this type fit in the entry's value field
    pub fn is_inline(&self, count: usize) -> bool {
        self.size()
            .checked_mul(count)
            .map_or(false, |total| total <= ifd::INLINE_CAPACITY)
    }

    /// Returns the name used in the TIFF specification
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SignedLong => "SLONG",
            FieldType::SignedRational => "SRATIONAL",
        }
    }
}

/// A decoded tag value
///
/// Single-count values are scalars; anything else is a `List` in file order.
/// ASCII data always decodes to `Text`, and so do enumerated values that
/// were replaced by their label.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Byte(u8),
    Short(u16),
    Long(u32),
    SignedLong(i32),
    Rational(f64),
    Text(String),
    List(Vec<TagValue>),
}

impl TagValue {
    /// Integer view of an unsigned scalar
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            TagValue::Byte(v) => Some(v as u32),
            TagValue::Short(v) => Some(v as u32),
            TagValue::Long(v) => Some(v),
            TagValue::SignedLong(v) => u32::try_from(v).ok(),
            _ => None,
        }
    }

    /// Numeric view of any numeric scalar
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            TagValue::Byte(v) => Some(v as f64),
            TagValue::Short(v) => Some(v as f64),
            TagValue::Long(v) => Some(v as f64),
            TagValue::SignedLong(v) => Some(v as f64),
            TagValue::Rational(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[TagValue]> {
        match self {
            TagValue::List(values) => Some(values),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TagValue::List(_))
    }

    /// Key used to look this value up in a label table
    ///
    /// Lists and rationals are never labelled.
    pub fn label_key(&self) -> Option<String> {
        match self {
            TagValue::Byte(v) => Some(v.to_string()),
            TagValue::Short(v) => Some(v.to_string()),
            TagValue::Long(v) => Some(v.to_string()),
            TagValue::SignedLong(v) => Some(v.to_string()),
            TagValue::Text(s) => Some(s.clone()),
            TagValue::Rational(_) | TagValue::List(_) => None,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Byte(v) => write!(f, "{}", v),
            TagValue::Short(v) => write!(f, "{}", v),
            TagValue::Long(v) => write!(f, "{}", v),
            TagValue::SignedLong(v) => write!(f, "{}", v),
            TagValue::Rational(v) => write!(f, "{}", v),
            TagValue::Text(s) => write!(f, "{}", s),
            TagValue::List(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}
