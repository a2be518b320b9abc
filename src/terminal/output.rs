//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use crate::buffer::Color;
use std::io::Write;

/// Pre-allocated buffer for building an ANSI escape stream.
///
/// A full screen render is accumulated here and flushed in one `write()`
/// syscall to prevent tearing mid-frame.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal screen.
    pub fn new() -> Self {
        Self::with_capacity(8192)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a single character.
    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.data
            .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    /// Move the terminal cursor to the origin.
    #[inline]
    pub fn cursor_home(&mut self) {
        self.data.extend_from_slice(b"\x1b[1;1H");
    }

    /// Emit a reset followed by background and foreground selection.
    ///
    /// The reset first is required because bright palette entries set the
    /// bold attribute, which would otherwise leak into later base colors.
    #[inline]
    pub fn set_colors(&mut self, fg: Color, bg: Color) {
        self.data.extend_from_slice(b"\x1b[0m");
        self.data.extend_from_slice(bg.bg_seq().as_bytes());
        self.data.extend_from_slice(fg.fg_seq().as_bytes());
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_colors_resets_first() {
        let mut out = OutputBuffer::new();
        out.set_colors(Color::Yellow, Color::Black);
        assert_eq!(out.as_bytes(), b"\x1b[0m\x1b[40m\x1b[33;1m");
    }

    #[test]
    fn test_cursor_home() {
        let mut out = OutputBuffer::new();
        out.cursor_home();
        assert_eq!(out.as_bytes(), b"\x1b[1;1H");
    }

    #[test]
    fn test_write_char_unicode() {
        let mut out = OutputBuffer::new();
        out.write_char('─');
        assert_eq!(out.as_bytes(), "─".as_bytes());
    }

    #[test]
    fn test_flush_to() {
        let mut out = OutputBuffer::new();
        out.write_str("abc");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"abc");
    }
}
