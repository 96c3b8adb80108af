//! Codepoint utilities for span offsets.
//!
//! Spans are measured in codepoints, while `regex` and `str` slicing work in
//! bytes. `CharIndex` converts between the two for a single text snapshot.

/// Pre-computed codepoint boundaries for one text snapshot.
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset where each codepoint starts, plus the total byte length.
    boundaries: Vec<usize>,
}

impl CharIndex {
    /// Build a char index from source text.
    pub fn new(source: &str) -> Self {
        let mut boundaries: Vec<usize> = source.char_indices().map(|(i, _)| i).collect();
        boundaries.push(source.len());
        Self { boundaries }
    }

    /// Number of codepoints in the snapshot.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Convert a byte offset to a codepoint offset.
    ///
    /// Offsets that fall inside a codepoint round down to its start.
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        match self.boundaries.binary_search(&byte_offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        }
    }

    /// Convert a codepoint offset to a byte offset, clamped to the text end.
    pub fn byte_offset(&self, char_offset: usize) -> usize {
        let last = self.boundaries.len() - 1;
        self.boundaries[char_offset.min(last)]
    }
}

/// Lowercase `text` one codepoint at a time.
///
/// A codepoint whose lowercase form is not exactly one codepoint (e.g. `İ`)
/// is kept as is, so offsets in the result line up with `text`.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        })
        .collect()
}
