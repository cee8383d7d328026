//! Tests for the EXIF parser facade

extern crate std;

use crate::exif::errors::ExifError;
use crate::exif::parser::ExifParser;
use crate::exif::tags::TagGroup;
use crate::exif::types::TagValue;
use crate::io::byte_order::ByteOrder;
use super::test_utils::*;

fn text(s: &str) -> TagValue {
    TagValue::Text(s.to_string())
}

/// Orientation-only segment, written out byte by byte
fn orientation_segment(identifier: &[u8; 5], magic: [u8; 2]) -> Vec<u8> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(&[0xFF, 0xE1]);       // APP1 marker
    buffer.extend_from_slice(&[0x00, 0x22]);       // Segment length (34)
    buffer.extend_from_slice(identifier);          // "Exif\0"
    buffer.push(0);                                // Padding
    buffer.extend_from_slice(&[0x49, 0x49]);       // "II" for little-endian
    buffer.extend_from_slice(&magic);              // TIFF magic number
    buffer.extend_from_slice(&[8, 0, 0, 0]);       // Offset to IFD0

    buffer.extend_from_slice(&[1, 0]);             // Number of entries
    buffer.extend_from_slice(&[0x12, 0x01]);       // Tag (0x0112, Orientation)
    buffer.extend_from_slice(&[3, 0]);             // Type (SHORT)
    buffer.extend_from_slice(&[1, 0, 0, 0]);       // Count
    buffer.extend_from_slice(&[6, 0, 0, 0]);       // Value (6)
    buffer.extend_from_slice(&[0, 0, 0, 0]);       // Next IFD offset (none)
    buffer
}

#[test]
fn test_orientation_end_to_end() {
    let segment = orientation_segment(b"EXIF\0", [0x2A, 0x00]);
    let parser = ExifParser::new(&segment[..]).unwrap();

    std::assert_eq!(parser.byte_order(), ByteOrder::LittleEndian);
    std::assert_eq!(parser.primary().get("Orientation"), Some(&TagValue::Short(6)));
    std::assert_eq!(parser.primary().len(), 1);
    std::assert_eq!(parser.offsets().ifd0, 18);
    std::assert!(parser.exif().is_none());
    std::assert!(parser.gps().is_none());
    std::assert!(parser.thumbnail().is_none());
}

#[test]
fn test_identifier_is_case_insensitive() {
    let segment = orientation_segment(b"Exif\0", [0x2A, 0x00]);
    std::assert!(ExifParser::new(&segment[..]).is_ok());
}

#[test]
fn test_bad_magic_fails_construction() {
    let segment = orientation_segment(b"Exif\0", [0x2B, 0x00]);
    let err = ExifParser::new(&segment[..]).unwrap_err();

    std::assert!(matches!(err, ExifError::InvalidMagic(0x002B)));
    std::assert!(err.is_invalid_metadata());
}

#[test]
fn test_bad_signature_fails_construction() {
    let mut segment = orientation_segment(b"Exif\0", [0x2A, 0x00]);
    segment[1] = 0xE0; // APP0
    std::assert!(matches!(ExifParser::new(&segment[..]), Err(ExifError::InvalidSignature)));

    let other = SegmentBuilder::new(ByteOrder::LittleEndian).identifier(b"XMP\0\0\0").build();
    std::assert!(matches!(ExifParser::new(&other[..]), Err(ExifError::InvalidSignature)));

    std::assert!(matches!(ExifParser::new(&[0xFF, 0xE1][..]), Err(ExifError::InvalidSignature)));
}

#[test]
fn test_magic_checked_in_big_endian() {
    let segment = SegmentBuilder::new(ByteOrder::BigEndian).magic(43).build();
    std::assert!(matches!(ExifParser::new(&segment[..]), Err(ExifError::InvalidMagic(43))));
}

#[test]
fn test_camera_segment_both_byte_orders() {
    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        let segment = create_camera_segment(order);
        let parser = ExifParser::new(&segment[..]).unwrap();
        std::assert_eq!(parser.byte_order(), order);

        let primary = parser.primary();
        std::assert_eq!(primary.get("Make"), Some(&text("Canon")));
        std::assert_eq!(primary.get("Model"), Some(&text("Canon EOS 5D Mark IV")));
        std::assert_eq!(primary.get("Orientation"), Some(&TagValue::Short(1)));
        std::assert_eq!(primary.get("Software"), Some(&text("Firmware 1.3.0")));
        std::assert!(!primary.contains_key("ExifIFDPointer"));
        std::assert!(!primary.contains_key("GPSInfoIFDPointer"));

        let exif = parser.exif().unwrap();
        std::assert_eq!(exif.get("ExifVersion"), Some(&text("0230")));
        std::assert_eq!(exif.get("FNumber"), Some(&TagValue::Rational(2.5)));
        std::assert_eq!(exif.get("ExposureTime"), Some(&TagValue::Rational(0.004)));
        std::assert_eq!(exif.get("ISOSpeedRatings"), Some(&TagValue::Short(400)));
        std::assert_eq!(exif.get("DateTimeOriginal"), Some(&text("2024:05:17 14:03:22")));
        std::assert_eq!(exif.get("MeteringMode"), Some(&text("Pattern")));
        std::assert_eq!(exif.get("Flash"), Some(&text("Flash fired, auto mode")));
        std::assert_eq!(exif.get("ColorSpace"), Some(&text("sRGB")));
        std::assert_eq!(exif.get("PixelXDimension"), Some(&TagValue::Long(640)));
        std::assert_eq!(exif.get("PixelYDimension"), Some(&TagValue::Long(480)));
        std::assert_eq!(exif.get("WhiteBalance"), Some(&text("Auto white balance")));

        let gps = parser.gps().unwrap();
        std::assert_eq!(gps.get("GPSVersionID"), Some(&text("2.3.0.0")));
        std::assert_eq!(gps.get("GPSLatitudeRef"), Some(&text("North latitude")));
        std::assert_eq!(gps.get("GPSLongitudeRef"), Some(&text("West longitude")));
        std::assert_eq!(
            gps.get("GPSLatitude"),
            Some(&TagValue::List(vec![
                TagValue::Rational(52.0),
                TagValue::Rational(30.0),
                TagValue::Rational(15.5),
            ]))
        );

        std::assert_eq!(parser.thumbnail(), Some(&[0xFF, 0xD8, 0xFF, 0xD9][..]));
    }
}

#[test]
fn test_missing_gps_is_absent_not_error() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let exif = builder.ifd().long(0xA002, 100);
    let segment = builder.with_exif(exif).build();

    let parser = ExifParser::new(&segment[..]).unwrap();
    std::assert!(parser.offsets().gps_ifd.is_none());
    std::assert!(parser.gps().is_none());
    std::assert_eq!(parser.exif().unwrap().get("PixelXDimension"), Some(&TagValue::Long(100)));
}

#[test]
fn test_unlabelled_enumeration_value_is_dropped() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let exif = builder.ifd()
        .short(0x9209, 2) // no label for Flash = 2
        .short(0xA408, 1);
    let segment = builder.with_exif(exif).build();

    let exif = ExifParser::new(&segment[..]).unwrap().exif().unwrap();
    std::assert!(!exif.contains_key("Flash"));
    std::assert_eq!(exif.get("Contrast"), Some(&text("Soft")));
}

#[test]
fn test_exif_decode_failure_does_not_affect_other_groups() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let exif = builder.ifd().raw(0xA002, 99, 1, [0, 0, 0, 0]);
    let gps = builder.ifd().ascii(0x0001, "S");
    let segment = builder.with_exif(exif).with_gps(gps).build();

    let parser = ExifParser::new(&segment[..]).unwrap();
    std::assert!(parser.exif().is_none());
    std::assert_eq!(parser.gps().unwrap().get("GPSLatitudeRef"), Some(&text("South latitude")));
}

#[test]
fn test_bad_field_type_in_ifd0_fails_construction() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let ifd0 = builder.ifd().raw(0x0112, 12, 1, [0, 0, 0, 0]);
    let segment = builder.with_ifd0(ifd0).build();

    let err = ExifParser::new(&segment[..]).unwrap_err();
    std::assert!(matches!(err, ExifError::UnsupportedFieldType(12)));
    std::assert!(err.is_invalid_metadata());
}

#[test]
fn test_unknown_tags_are_skipped_unread() {
    let builder = SegmentBuilder::new(ByteOrder::BigEndian);
    let ifd0 = builder.ifd()
        .raw(0x0100, 99, 1000, [0xFF, 0xFF, 0xFF, 0xFF]) // not catalogued, bogus type and offset
        .short(0x0112, 3);
    let segment = builder.with_ifd0(ifd0).build();

    let parser = ExifParser::new(&segment[..]).unwrap();
    std::assert_eq!(parser.primary().len(), 1);
    std::assert_eq!(parser.primary().get("Orientation"), Some(&TagValue::Short(3)));
}

#[test]
fn test_sub_ifd_pointer_outside_segment_is_ignored() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let ifd0 = builder.ifd().long(EXIF_POINTER_TAG, 50_000);
    let segment = builder.with_ifd0(ifd0).build();

    let parser = ExifParser::new(&segment[..]).unwrap();
    std::assert!(parser.offsets().exif_ifd.is_none());
    std::assert!(parser.exif().is_none());
    std::assert!(!parser.primary().contains_key("ExifIFDPointer"));
}

#[test]
fn test_thumbnail_requires_length() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let ifd1 = builder.ifd().long(THUMBNAIL_OFFSET_TAG, 8);
    let segment = builder.with_ifd1(ifd1).build();

    let parser = ExifParser::new(&segment[..]).unwrap();
    std::assert!(parser.offsets().ifd1.is_some());
    std::assert!(parser.thumbnail().is_none());
}

#[test]
fn test_thumbnail_out_of_range_is_absent() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let ifd1 = builder.ifd()
        .long(THUMBNAIL_OFFSET_TAG, 8)
        .long(THUMBNAIL_LENGTH_TAG, 10_000);
    let segment = builder.with_ifd1(ifd1).build();

    std::assert!(ExifParser::new(&segment[..]).unwrap().thumbnail().is_none());
}

#[test]
fn test_set_pixel_dimension_round_trip() {
    let mut segment = create_camera_segment(ByteOrder::BigEndian);
    let mut parser = ExifParser::new(&mut segment[..]).unwrap();

    std::assert!(parser.set_scalar_tag(TagGroup::Exif, "PixelXDimension", 1024));
    std::assert!(parser.set_exif("PixelYDimension", 768));

    let exif = parser.exif().unwrap();
    std::assert_eq!(exif.get("PixelXDimension"), Some(&TagValue::Long(1024)));
    std::assert_eq!(exif.get("PixelYDimension"), Some(&TagValue::Long(768)));
}

#[test]
fn test_set_rejects_non_whitelisted_tags_without_touching_bytes() {
    let original = create_camera_segment(ByteOrder::LittleEndian);
    let mut segment = original.clone();
    let mut parser = ExifParser::new(segment.as_mut_slice()).unwrap();

    std::assert!(!parser.set_scalar_tag(TagGroup::Exif, "ISOSpeedRatings", 800));
    std::assert!(!parser.set_scalar_tag(TagGroup::Tiff, "Orientation", 3));
    std::assert!(!parser.set_scalar_tag(TagGroup::Gps, "PixelXDimension", 3));
    std::assert!(!parser.set_exif("NoSuchTag", 1));

    parser.release();
    std::assert_eq!(segment, original);
}

#[test]
fn test_set_fails_when_tag_absent() {
    let builder = SegmentBuilder::new(ByteOrder::LittleEndian);
    let exif = builder.ifd().long(0xA002, 100);
    let mut segment = builder.with_exif(exif).build();
    let original = segment.clone();

    let mut parser = ExifParser::new(&mut segment).unwrap();
    std::assert!(!parser.set_exif("PixelYDimension", 10));
    std::assert_eq!(parser.release(), &original);
}

#[test]
fn test_set_fails_without_exif_ifd() {
    let mut segment = orientation_segment(b"Exif\0", [0x2A, 0x00]);
    let mut parser = ExifParser::new(&mut segment[..]).unwrap();
    std::assert!(!parser.set_exif("PixelXDimension", 10));
}

#[test]
fn test_set_short_pixel_dimension() {
    let builder = SegmentBuilder::new(ByteOrder::BigEndian);
    let exif = builder.ifd().short(0xA002, 320);
    let mut segment = builder.with_exif(exif).build();

    let mut parser = ExifParser::new(segment.clone()).unwrap();
    std::assert!(parser.set_exif("PixelXDimension", 1280));
    std::assert_eq!(parser.exif().unwrap().get("PixelXDimension"), Some(&TagValue::Short(1280)));

    let mut parser = ExifParser::new(&mut segment[..]).unwrap();
    std::assert!(!parser.set_exif("PixelXDimension", 70_000));
    std::assert_eq!(parser.exif().unwrap().get("PixelXDimension"), Some(&TagValue::Short(320)));
}

#[test]
fn test_release_returns_buffer() {
    let segment = create_camera_segment(ByteOrder::LittleEndian);
    let parser = ExifParser::new(segment.clone()).unwrap();
    std::assert_eq!(parser.release(), segment);
}
