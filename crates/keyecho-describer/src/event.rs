//! Snapshot of an editable field after an edit or selection change.

use crate::text::Utf16Text;

/// The value and selection of a text field at one moment.
///
/// Offsets are UTF-16 code units. Construction swaps a reversed selection
/// and clamps both offsets into the value, so `start <= end <= len` always
/// holds afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChangeEvent {
    value: Utf16Text,
    start: usize,
    end: usize,
    triggered_by_user: bool,
    composition: Option<String>,
}

impl TextChangeEvent {
    pub fn new(value: impl Into<String>, start: usize, end: usize) -> Self {
        let value = Utf16Text::new(value);
        let (start, end) = if start > end { (end, start) } else { (start, end) };
        let start = value.clamp(start);
        let end = value.clamp(end);
        Self {
            value,
            start,
            end,
            triggered_by_user: true,
            composition: None,
        }
    }

    /// Build from signed offsets, as reported by hosts that may send
    /// negative positions. Negatives clamp to 0.
    pub fn from_signed(value: impl Into<String>, start: i64, end: i64) -> Self {
        let to_offset = |offset: i64| usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        Self::new(value, to_offset(start), to_offset(end))
    }

    /// Mark the change as not caused directly by the user, so its speech
    /// queues behind whatever is already being said.
    pub fn not_user_triggered(mut self) -> Self {
        self.triggered_by_user = false;
        self
    }

    /// Attach the text of the in-progress IME composition.
    pub fn with_composition(mut self, composition: impl Into<String>) -> Self {
        self.composition = Some(composition.into());
        self
    }

    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    pub fn text(&self) -> &Utf16Text {
        &self.value
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn triggered_by_user(&self) -> bool {
        self.triggered_by_user
    }

    pub fn composition(&self) -> Option<&str> {
        self.composition.as_deref()
    }
}
