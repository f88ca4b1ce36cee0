//! ESC/POS framing for raw network printers
//!
//! Tickets are plain text. The network adapter wraps them in the minimum
//! command set a thermal printer needs: initialize, code page, feed, cut.

use crate::encoding::convert_to_cp1252;

/// ESC @ - initialize printer
const INIT: [u8; 2] = [0x1B, 0x40];

/// ESC/POS frame builder
///
/// Wraps UTF-8 ticket text into a byte job for thermal printers.
pub struct EscPosFrame {
    feed_lines: u8,
    cut: bool,
}

impl EscPosFrame {
    pub fn new() -> Self {
        Self {
            feed_lines: 3,
            cut: true,
        }
    }

    /// Lines fed before cutting
    pub fn feed_lines(mut self, lines: u8) -> Self {
        self.feed_lines = lines;
        self
    }

    /// Disable the paper cut (printers without cutter)
    pub fn without_cut(mut self) -> Self {
        self.cut = false;
        self
    }

    /// Build the final byte buffer with Windows-1252 encoding
    pub fn build(&self, text: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(text.len() + 16);
        buf.extend_from_slice(&INIT);
        buf.extend_from_slice(&convert_to_cp1252(text));
        if !text.ends_with('\n') {
            buf.push(b'\n');
        }
        if self.cut {
            // GS V 66 n - full cut after feeding n lines
            buf.extend_from_slice(&[0x1D, 0x56, 0x42, self.feed_lines]);
        } else {
            // ESC d n - print and feed n lines
            buf.extend_from_slice(&[0x1B, 0x64, self.feed_lines]);
        }
        buf
    }
}

impl Default for EscPosFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_starts_with_init_and_ends_with_cut() {
        let data = EscPosFrame::new().build("Mesa 5\n");
        assert_eq!(&data[..2], &INIT);
        assert_eq!(&data[data.len() - 4..], &[0x1D, 0x56, 0x42, 3]);
    }

    #[test]
    fn test_frame_without_cut_feeds() {
        let data = EscPosFrame::new().feed_lines(5).without_cut().build("x");
        // newline appended to unterminated text
        assert_eq!(&data[data.len() - 4..], &[b'\n', 0x1B, 0x64, 5]);
    }
}
