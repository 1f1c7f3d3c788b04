//! Outbound collaborators: a speech engine and a braille display.
//!
//! Real engines live in the host. The recording implementations here keep
//! everything they receive, and their clones share one buffer, so a host or
//! test can hand one clone to a describer and inspect the other.

use std::sync::{Arc, Mutex};

use keyecho_core::types::{BrailleContent, QueueMode, SpeechProperties};

/// Something that can speak text.
pub trait SpeechOutput {
    fn speak(&self, text: &str, mode: QueueMode, properties: SpeechProperties);
}

/// Something that can show text and a selection on a braille display.
pub trait BrailleOutput {
    fn write(&self, content: BrailleContent);
}

/// One `speak` call as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpokenText {
    pub text: String,
    pub mode: QueueMode,
    pub properties: SpeechProperties,
}

/// Speech output that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeech {
    spoken: Arc<Mutex<Vec<SpokenText>>>,
}

impl RecordingSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything spoken so far, with queue modes and properties.
    pub fn spoken(&self) -> Vec<SpokenText> {
        self.lock().clone()
    }

    /// Just the texts spoken so far.
    pub fn texts(&self) -> Vec<String> {
        self.lock().iter().map(|s| s.text.clone()).collect()
    }

    /// Remove and return everything spoken so far.
    pub fn take(&self) -> Vec<SpokenText> {
        std::mem::take(&mut *self.lock())
    }

    /// Remove and return the texts spoken so far.
    pub fn take_texts(&self) -> Vec<String> {
        self.take().into_iter().map(|s| s.text).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SpokenText>> {
        self.spoken.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&self, text: &str, mode: QueueMode, properties: SpeechProperties) {
        self.lock().push(SpokenText {
            text: text.to_string(),
            mode,
            properties,
        });
    }
}

/// Braille output that records every write.
#[derive(Debug, Clone, Default)]
pub struct RecordingBraille {
    written: Arc<Mutex<Vec<BrailleContent>>>,
}

impl RecordingBraille {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<BrailleContent> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<BrailleContent> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<BrailleContent>> {
        self.written.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BrailleOutput for RecordingBraille {
    fn write(&self, content: BrailleContent) {
        self.lock().push(content);
    }
}

/// For hosts without a braille display.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBraille;

impl BrailleOutput for NoBraille {
    fn write(&self, _content: BrailleContent) {}
}
