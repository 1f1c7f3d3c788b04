//! Drives a describer through a parsed script and renders a transcript.

use keyecho_core::types::TypingEcho;
use keyecho_describer::{
    common_affix_diff, DescriberOptions, RecordingBraille, RecordingSpeech, TextChangeDescriber,
    TextChangeEvent, TypingEchoSetting, Utf16Text,
};

use crate::script::ScriptEntry;

/// How the replayed field behaves.
#[derive(Debug, Clone)]
pub struct ReplaySettings {
    pub echo: TypingEcho,
    pub multiline: bool,
    pub options: DescriberOptions,
}

/// Replay `entries` and return one transcript line per speech or braille
/// output, in order.
///
/// A `change` before any `init` starts from an empty field.
pub fn replay(entries: &[ScriptEntry], settings: &ReplaySettings) -> Vec<String> {
    let echo = TypingEchoSetting::new(settings.echo);
    let speech = RecordingSpeech::new();
    let braille = RecordingBraille::new();
    let focus = |value: &str, start: i64, end: i64| {
        let initial = TextChangeEvent::from_signed(value, start, end);
        let describer = TextChangeDescriber::new(
            initial.value(),
            initial.start(),
            initial.end(),
            settings.multiline,
            speech.clone(),
        )
        .with_braille(braille.clone())
        .with_typing_echo(echo.accessor())
        .with_options(settings.options.clone());
        tracing::debug!(describer = %describer.id(), "Focused field");
        describer
    };

    let mut describer = focus("", 0, 0);
    let mut transcript = Vec::new();
    let mut braille_seen = 0;

    for entry in entries {
        match entry {
            ScriptEntry::Init { value, start, end } => {
                describer = focus(value, *start, *end);
            }
            ScriptEntry::Echo { mode } => echo.set(*mode),
            ScriptEntry::Change { .. } => {
                if let Some(event) = entry.to_event() {
                    describer.describe(event);
                }
            }
        }

        for spoken in speech.take() {
            transcript.push(format!("speak[{}] {}", spoken.mode, spoken.text));
        }
        let writes = braille.writes();
        for content in &writes[braille_seen..] {
            transcript.push(format!(
                "braille {} [{},{}]",
                content.text, content.start_index, content.end_index
            ));
        }
        braille_seen = writes.len();
    }

    transcript
}

/// Render the common-affix diff between `old` and `new`.
pub fn describe_diff(old: &str, new: &str) -> Vec<String> {
    let old = Utf16Text::new(old);
    let new = Utf16Text::new(new);
    let diff = common_affix_diff(old.units(), new.units());
    vec![
        format!("prefix: {}", diff.prefix_len),
        format!("suffix: {}", diff.suffix_len),
        format!(
            "deleted: {:?}",
            String::from_utf16_lossy(diff.deleted(old.units()))
        ),
        format!(
            "inserted: {:?}",
            String::from_utf16_lossy(diff.inserted(new.units()))
        ),
    ]
}
