//! UTF-16 view of field text.
//!
//! Host text controls report selection offsets in UTF-16 code units, so every
//! offset the describer handles indexes into [`Utf16Text::units`].

use std::fmt;
use std::ops::Range;

/// A string paired with its UTF-16 encoding.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Utf16Text {
    text: String,
    units: Vec<u16>,
}

impl Utf16Text {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let units = text.encode_utf16().collect();
        Self { text, units }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn units(&self) -> &[u16] {
        &self.units
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Clamp `offset` into `[0, len]`.
    pub fn clamp(&self, offset: usize) -> usize {
        offset.min(self.len())
    }

    /// Decode the units in `range`, clamping both ends.
    ///
    /// A range that splits a surrogate pair decodes the lone half as U+FFFD.
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end).max(start);
        String::from_utf16_lossy(&self.units[start..end])
    }
}

impl fmt::Debug for Utf16Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text, f)
    }
}

impl From<&str> for Utf16Text {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Utf16Text {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Whether a code unit separates words.
///
/// Anything that is not alphanumeric or `_` breaks words: whitespace,
/// punctuation, symbols. Lone surrogates never do.
pub fn is_word_break(unit: u16) -> bool {
    match char::from_u32(u32::from(unit)) {
        Some(c) => !(c.is_alphanumeric() || c == '_'),
        None => false,
    }
}

/// Number of characters in `units`. A surrogate pair counts once, and so
/// does each lone surrogate.
pub fn char_count(units: &[u16]) -> usize {
    char::decode_utf16(units.iter().copied()).count()
}

/// Offset where the word ending just before `end` begins.
pub fn word_start(units: &[u16], end: usize) -> usize {
    let mut index = end.min(units.len());
    while index > 0 && !is_word_break(units[index - 1]) {
        index -= 1;
    }
    index
}
