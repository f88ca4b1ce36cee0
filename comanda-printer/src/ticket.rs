//! Plain-text ticket builder
//!
//! Fluent builder for fixed-width receipt text. Output is a UTF-8 `String`
//! that can be shown on screen, logged, served over HTTP or framed for a
//! thermal printer with [`crate::EscPosFrame`].

use crate::encoding::{text_width, truncate_width};

/// Fixed-width text ticket builder
pub struct TicketBuilder {
    buf: String,
    width: usize,
}

impl TicketBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 40-48 characters
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::with_capacity(512),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn write(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.push_str(s);
        self.buf.push('\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Write multiple empty lines
    pub fn feed(&mut self, lines: usize) -> &mut Self {
        for _ in 0..lines {
            self.buf.push('\n');
        }
        self
    }

    // === Separators ===

    /// Print a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        let sep = "=".repeat(self.width);
        self.line(&sep)
    }

    /// Print a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        let sep = "-".repeat(self.width);
        self.line(&sep)
    }

    // === Layout Helpers ===

    /// Print text centered in the line width (left padding only)
    pub fn center(&mut self, s: &str) -> &mut Self {
        let w = text_width(s);
        if w >= self.width {
            return self.line(s);
        }
        let pad = " ".repeat((self.width - w) / 2);
        self.write(&pad);
        self.line(s)
    }

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left);
        let rw = text_width(right);

        if lw + rw >= self.width {
            // Too long, just print with space
            self.line(&format!("{} {}", left, right))
        } else {
            let spaces = " ".repeat(self.width - lw - rw);
            self.line(&format!("{}{}{}", left, spaces, right))
        }
    }

    /// Print right-aligned text
    pub fn right(&mut self, s: &str) -> &mut Self {
        self.line_lr("", s)
    }

    /// Print `left`, a run of `fill`, then `right`, clipped to the width
    ///
    /// When both sides overflow no fill is emitted and the line is cut at
    /// the width, so the right side may be partially lost.
    pub fn line_fill(&mut self, left: &str, right: &str, fill: char) -> &mut Self {
        let used = text_width(left) + text_width(right);
        let gap = self.width.saturating_sub(used);
        let fill: String = std::iter::repeat_n(fill, gap).collect();
        let full = format!("{}{}{}", left, fill, right);
        let clipped = truncate_width(&full, self.width);
        self.line(&clipped)
    }

    // === Build ===

    /// Finalize and return the accumulated string
    pub fn finalize(self) -> String {
        self.buf
    }

    /// Get the current buffer as a string reference
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}

impl Default for TicketBuilder {
    fn default() -> Self {
        Self::new(40)
    }
}
