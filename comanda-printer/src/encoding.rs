//! Windows-1252 encoding utilities for thermal printers
//!
//! Brazilian thermal printers ship with a Latin code page. Ticket text is
//! built as UTF-8 and only converted to single-byte Windows-1252 on the way
//! to the device, so widths are measured in characters, not bytes.

use tracing::instrument;

/// ESC t 16 - select code page WPC1252
const SELECT_WPC1252: [u8; 3] = [0x1B, 0x74, 16];

/// Printable width of a string in columns (one column per char)
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` columns
pub fn truncate_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Convert UTF-8 ticket text to Windows-1252 bytes
///
/// Selects the code page first. Characters with no Windows-1252 mapping
/// become `?` instead of HTML entities.
#[instrument(skip(text), fields(len = text.len()))]
pub fn convert_to_cp1252(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len() + SELECT_WPC1252.len());
    result.extend_from_slice(&SELECT_WPC1252);

    let mut buf = [0u8; 4];
    for c in text.chars() {
        if c.is_ascii() {
            result.push(c as u8);
            continue;
        }
        let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors {
            result.push(b'?');
        } else {
            result.extend_from_slice(&bytes);
        }
    }
    result
}
