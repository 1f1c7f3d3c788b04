//! JSON-lines replay scripts.
//!
//! One JSON object per line, tagged by `type`:
//!
//! ```text
//! {"type":"init","value":"","start":0,"end":0}
//! {"type":"change","value":"g","start":1,"end":1}
//! {"type":"echo","mode":"word"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use serde::{Deserialize, Serialize};

use keyecho_core::error::{KeyechoError, Result};
use keyecho_core::types::TypingEcho;
use keyecho_describer::TextChangeEvent;

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEntry {
    /// Focus a new field with this initial state.
    Init {
        value: String,
        #[serde(default)]
        start: i64,
        #[serde(default)]
        end: i64,
    },
    /// The focused field changed.
    Change {
        value: String,
        start: i64,
        end: i64,
        #[serde(default)]
        composition: Option<String>,
        #[serde(default = "default_true")]
        triggered_by_user: bool,
    },
    /// The user switched typing echo mode.
    Echo { mode: TypingEcho },
}

fn default_true() -> bool {
    true
}

impl ScriptEntry {
    /// The event for a `Change` entry.
    pub fn to_event(&self) -> Option<TextChangeEvent> {
        match self {
            ScriptEntry::Change {
                value,
                start,
                end,
                composition,
                triggered_by_user,
            } => {
                let mut event = TextChangeEvent::from_signed(value.clone(), *start, *end);
                if let Some(composition) = composition {
                    event = event.with_composition(composition.clone());
                }
                if !triggered_by_user {
                    event = event.not_user_triggered();
                }
                Some(event)
            }
            _ => None,
        }
    }
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse_script(content: &str) -> Result<Vec<ScriptEntry>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| KeyechoError::Script {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}
