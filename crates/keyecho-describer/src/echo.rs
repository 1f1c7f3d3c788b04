//! Typing echo setting shared between a host and its describers.
//!
//! Describers never read ambient global state. They hold a [`TypingEchoFn`]
//! and call it once per event, so a mode change made through a
//! [`TypingEchoSetting`] takes effect on the next change without rebuilding
//! anything.

use std::sync::{Arc, Mutex};

use keyecho_core::types::TypingEcho;

/// Reads the current typing echo mode.
pub type TypingEchoFn = Box<dyn Fn() -> TypingEcho + Send + Sync>;

/// Accessor that always returns `mode`.
pub fn fixed(mode: TypingEcho) -> TypingEchoFn {
    Box::new(move || mode)
}

/// Thread-safe, clonable handle over a typing echo mode.
///
/// Clones share the same underlying value.
#[derive(Debug, Clone, Default)]
pub struct TypingEchoSetting {
    mode: Arc<Mutex<TypingEcho>>,
}

impl TypingEchoSetting {
    pub fn new(mode: TypingEcho) -> Self {
        Self {
            mode: Arc::new(Mutex::new(mode)),
        }
    }

    pub fn get(&self) -> TypingEcho {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set(&self, mode: TypingEcho) {
        let mut current = self.mode.lock().unwrap_or_else(|e| e.into_inner());
        if *current != mode {
            tracing::debug!("Typing echo: {} -> {}", *current, mode);
        }
        *current = mode;
    }

    /// An accessor reading this setting on every call.
    pub fn accessor(&self) -> TypingEchoFn {
        let setting = self.clone();
        Box::new(move || setting.get())
    }
}
