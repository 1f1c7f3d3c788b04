//! What the describer remembers between events.

use crate::event::TextChangeEvent;
use crate::text::Utf16Text;

/// Last processed value and selection of a field, owned by one describer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DescriberState {
    value: Utf16Text,
    start: usize,
    end: usize,
    multiline: bool,
    composition: Option<String>,
}

impl DescriberState {
    /// Offsets are clamped and ordered the same way event offsets are.
    pub fn new(value: impl Into<String>, start: usize, end: usize, multiline: bool) -> Self {
        let initial = TextChangeEvent::new(value, start, end);
        Self {
            value: initial.text().clone(),
            start: initial.start(),
            end: initial.end(),
            multiline,
            composition: None,
        }
    }

    pub fn value(&self) -> &Utf16Text {
        &self.value
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn multiline(&self) -> bool {
        self.multiline
    }

    pub fn composition(&self) -> Option<&str> {
        self.composition.as_deref()
    }

    /// Whether a non-empty selection covered exactly `start..end`.
    pub fn selection_was(&self, start: usize, end: usize) -> bool {
        self.start < self.end && self.start == start && self.end == end
    }

    /// Whether `event` carries the same value and selection.
    pub fn matches(&self, event: &TextChangeEvent) -> bool {
        self.value.as_str() == event.value()
            && self.start == event.start()
            && self.end == event.end()
    }

    pub(crate) fn apply(&mut self, event: &TextChangeEvent) {
        if self.value.as_str() != event.value() {
            self.value = event.text().clone();
        }
        self.start = event.start();
        self.end = event.end();
        self.composition = event.composition().map(str::to_owned);
    }
}
