//! Tests for the EXIF value types

extern crate std;

use crate::exif::errors::ExifError;
use crate::exif::types::{FieldType, TagValue};

#[test]
fn test_field_type_codes() {
    std::assert_eq!(FieldType::from_code(1).unwrap(), FieldType::Byte);
    std::assert_eq!(FieldType::from_code(7).unwrap(), FieldType::Undefined);
    std::assert_eq!(FieldType::from_code(10).unwrap(), FieldType::SignedRational);
    std::assert!(matches!(FieldType::from_code(6), Err(ExifError::UnsupportedFieldType(6))));
    std::assert!(matches!(FieldType::from_code(0), Err(ExifError::UnsupportedFieldType(0))));
}

#[test]
fn test_inline_rules() {
    std::assert!(FieldType::Ascii.is_inline(4));
    std::assert!(!FieldType::Ascii.is_inline(5));
    std::assert!(FieldType::Undefined.is_inline(4));
    std::assert!(FieldType::Short.is_inline(2));
    std::assert!(!FieldType::Short.is_inline(3));
    std::assert!(FieldType::Long.is_inline(1));
    std::assert!(!FieldType::SignedLong.is_inline(2));
    std::assert!(!FieldType::Rational.is_inline(1));
    std::assert!(FieldType::SignedRational.is_inline(0));
    std::assert!(!FieldType::Byte.is_inline(usize::MAX));
}

#[test]
fn test_value_views() {
    std::assert_eq!(TagValue::Short(6).as_u32(), Some(6));
    std::assert_eq!(TagValue::SignedLong(-1).as_u32(), None);
    std::assert_eq!(TagValue::Rational(2.5).as_f64(), Some(2.5));
    std::assert_eq!(TagValue::Text("N".to_string()).label_key(), Some("N".to_string()));
    std::assert_eq!(TagValue::Rational(1.0).label_key(), None);
    std::assert_eq!(TagValue::List(vec![]).label_key(), None);
    std::assert!(TagValue::List(vec![TagValue::Byte(1)]).as_list().is_some());
}

#[test]
fn test_value_display() {
    let list = TagValue::List(vec![TagValue::Rational(52.0), TagValue::Rational(15.5)]);
    std::assert_eq!(list.to_string(), "52, 15.5");
    std::assert_eq!(TagValue::Text("Canon".to_string()).to_string(), "Canon");
    std::assert_eq!(TagValue::SignedLong(-7).to_string(), "-7");
}
