//! Character-indexed view of source text

use crate::types::{Location, Range};

/// Source text indexed by character offset.
///
/// The YAML scanner reports positions as character indices, while Rust
/// strings are sliced by byte. `SourceText` scans the content once and keeps
/// the byte offset of every character so that ranges can be turned back into
/// `&str` slices, plus the positions of line breaks so that offsets can be
/// mapped to (row, column) in O(log n).
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,

    /// Characters of `text`, for lookahead scanning by character offset
    chars: Vec<char>,

    /// Byte offset of each character, with a final entry for `text.len()`
    byte_offsets: Vec<usize>,

    /// Character offsets of each newline
    line_breaks: Vec<usize>,
}

impl<'a> SourceText<'a> {
    /// Index `text`.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlnav_source_map::{Range, SourceText};
    ///
    /// let source = SourceText::new("name: café\nsize: 1");
    /// assert_eq!(source.slice(Range::new(6, 10)), Some("café"));
    /// assert_eq!(source.location(11).unwrap().row, 1);
    /// ```
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);
        let mut line_breaks = Vec::new();

        for (idx, (byte, ch)) in text.char_indices().enumerate() {
            if ch == '\n' {
                line_breaks.push(idx);
            }
            chars.push(ch);
            byte_offsets.push(byte);
        }
        byte_offsets.push(text.len());

        SourceText {
            text,
            chars,
            byte_offsets,
            line_breaks,
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Range covering the whole text.
    pub fn full_range(&self) -> Range {
        Range::new(0, self.char_len())
    }

    /// The character at `offset`, if in bounds.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Characters from `offset` to the end of the text.
    pub fn chars_from(&self, offset: usize) -> &[char] {
        self.chars.get(offset..).unwrap_or(&[])
    }

    /// Byte span of a character range, or None if it is out of bounds.
    pub fn byte_range(&self, range: Range) -> Option<std::ops::Range<usize>> {
        if range.start > range.end {
            return None;
        }
        let start = *self.byte_offsets.get(range.start)?;
        let end = *self.byte_offsets.get(range.end)?;
        Some(start..end)
    }

    /// The text covered by `range`, or None if it is out of bounds.
    pub fn slice(&self, range: Range) -> Option<&'a str> {
        let bytes = self.byte_range(range)?;
        self.text.get(bytes)
    }

    /// Convert a character offset to a Location with row and column.
    ///
    /// Returns None if the offset is out of bounds. An offset equal to the
    /// text length is valid and denotes the end of input.
    pub fn location(&self, offset: usize) -> Option<Location> {
        if offset > self.char_len() {
            return None;
        }

        // A newline belongs to the line it terminates
        let row = match self.line_breaks.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx,
        };

        let line_start = if row == 0 {
            0
        } else {
            self.line_breaks[row - 1] + 1
        };

        Some(Location {
            offset,
            row,
            column: offset - line_start,
        })
    }

    /// Character offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        match self.line_breaks.binary_search(&offset) {
            Ok(0) | Err(0) => 0,
            Ok(idx) | Err(idx) => self.line_breaks[idx - 1] + 1,
        }
    }

    /// Character offset of the end of the line containing `offset`
    /// (the position of its newline, or the end of the text).
    pub fn line_end(&self, offset: usize) -> usize {
        match self.line_breaks.binary_search(&offset) {
            Ok(idx) => self.line_breaks[idx],
            Err(idx) => self
                .line_breaks
                .get(idx)
                .copied()
                .unwrap_or_else(|| self.char_len()),
        }
    }

    /// Get the number of lines in the text
    pub fn line_count(&self) -> usize {
        self.line_breaks.len() + 1
    }
}
