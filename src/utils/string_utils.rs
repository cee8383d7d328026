//! String utility functions
//!
//! Utilities for turning raw EXIF bytes into text.

/// Strips the NUL terminator (and any NUL padding) from ASCII tag data
pub fn trim_trailing_nulls(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |pos| pos + 1);
    &bytes[..end]
}

/// Maps each byte to the character with the same code
///
/// Camera firmware writes Latin-1 as often as ASCII, so this never fails.
pub fn bytes_to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_terminator_and_padding() {
        assert_eq!(trim_trailing_nulls(b"Canon\0\0"), b"Canon");
        assert_eq!(trim_trailing_nulls(b"\0\0"), b"");
        assert_eq!(trim_trailing_nulls(b"N"), b"N");
    }

    #[test]
    fn maps_bytes_one_to_one() {
        assert_eq!(bytes_to_text(b"0230"), "0230");
        assert_eq!(bytes_to_text(&[0x43, 0xE9]), "C\u{e9}");
    }
}
