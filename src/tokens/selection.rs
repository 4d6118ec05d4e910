//! Selected sub-ranges of a document

use serde::{Deserialize, Serialize};

/// A selection in a document, as Unicode scalar value offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSelection {
    pub start: usize,
    pub end: usize,
}

impl TextSelection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Extract the selected text.
    ///
    /// Offsets past the end are clamped and reversed bounds are swapped.
    /// Returns `None` when the resulting range is empty.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let (start, end) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };

        if start == end {
            return None;
        }

        let start_byte = char_to_byte_offset(text, start)?;
        let end_byte = char_to_byte_offset(text, end).unwrap_or(text.len());

        if start_byte >= end_byte {
            return None;
        }

        Some(&text[start_byte..end_byte])
    }
}

/// Byte offset of the `n`th char, or the text length when `n` is exactly the
/// char count. `None` when `n` lies beyond the end.
fn char_to_byte_offset(text: &str, n: usize) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .nth(n)
}
