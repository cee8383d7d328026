//! JPEG marker utilities
//!
//! Locates the APP1 segment carrying EXIF data inside a JPEG stream.

use std::ops::Range;

use log::{debug, trace};

/// JPEG marker codes used while scanning
mod markers {
    pub const PREFIX: u8 = 0xFF;
    pub const SOI: u8 = 0xD8;
    pub const EOI: u8 = 0xD9;
    pub const SOS: u8 = 0xDA;
    pub const APP1: u8 = 0xE1;
    pub const TEM: u8 = 0x01;
    pub const RST0: u8 = 0xD0;
    pub const RST7: u8 = 0xD7;
}

const EXIF_IDENTIFIER: &[u8] = b"Exif\0";

/// Returns the byte range of the first APP1 EXIF segment in `jpeg`
///
/// The range starts at the `FF E1` marker and covers the whole segment, so
/// it can be handed to `ExifParser` as is. Scanning stops at the start of
/// scan data; malformed or truncated marker structure yields `None`.
pub fn find_exif_segment(jpeg: &[u8]) -> Option<Range<usize>> {
    if jpeg.len() < 2 || jpeg[0] != markers::PREFIX || jpeg[1] != markers::SOI {
        debug!("Not a JPEG stream: missing SOI marker");
        return None;
    }

    let mut pos = 2;
    while pos + 1 < jpeg.len() {
        if jpeg[pos] != markers::PREFIX {
            debug!("Expected marker at offset {}, found {:#04x}", pos, jpeg[pos]);
            return None;
        }

        let marker = jpeg[pos + 1];
        match marker {
            // fill byte before the real marker
            markers::PREFIX => {
                pos += 1;
                continue;
            }
            markers::SOS | markers::EOI => {
                debug!("Reached marker {:#04x} at offset {} without finding EXIF", marker, pos);
                return None;
            }
            markers::TEM | markers::RST0..=markers::RST7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        let length = segment_length(jpeg, pos)?;
        let end = pos + 2 + length;
        if end > jpeg.len() {
            debug!("Segment {:#04x} at offset {} is truncated", marker, pos);
            return None;
        }

        trace!("Segment {:#04x} at offset {}, {} bytes", marker, pos, length);
        if marker == markers::APP1 && jpeg[pos + 4..end].starts_with(EXIF_IDENTIFIER) {
            return Some(pos..end);
        }

        pos = end;
    }

    None
}

/// Reads the big-endian length field following the marker at `pos`
fn segment_length(jpeg: &[u8], pos: usize) -> Option<usize> {
    let bytes = jpeg.get(pos + 2..pos + 4)?;
    let length = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    // the length field counts itself
    (length >= 2).then_some(length)
}
