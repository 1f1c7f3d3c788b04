//! Turns successive snapshots of an editable field into spoken feedback.
//!
//! Each call to [`TextChangeDescriber::describe`] compares the incoming
//! [`TextChangeEvent`] against the last one it saw and works out, in order:
//! - nothing changed: stay silent
//! - password field: speak a placeholder, never the content
//! - IME composition moved: speak just the newly composed text
//! - only the selection moved: speak what was selected or unselected
//! - the value changed: find what was typed, pasted or erased and speak it
//!   according to the current typing echo mode
//!
//! Braille always gets the literal new value and selection, spoken or not.

use std::fmt;

use keyecho_core::config::{KeyechoConfig, MessageConfig};
use keyecho_core::types::{
    Annotation, BrailleContent, QueueMode, SpeechProperties, TypingEcho, Utterance,
};
use uuid::Uuid;

use crate::diff::{common_affix_diff, middle};
use crate::echo::{self, TypingEchoFn};
use crate::event::TextChangeEvent;
use crate::output::{BrailleOutput, NoBraille, SpeechOutput};
use crate::state::DescriberState;
use crate::text::{char_count, is_word_break, word_start, Utf16Text};

/// Per-field options that do not change while the field has focus.
#[derive(Debug, Clone)]
pub struct DescriberOptions {
    /// Speak a placeholder instead of any content.
    pub password: bool,
    /// When no caret-based explanation of a change fits, new values up to
    /// this many UTF-16 units are spoken whole.
    pub max_short_phrase_len: usize,
    /// Labels for annotations and fixed announcements.
    pub messages: MessageConfig,
}

impl Default for DescriberOptions {
    fn default() -> Self {
        Self {
            password: false,
            max_short_phrase_len: 60,
            messages: MessageConfig::default(),
        }
    }
}

impl DescriberOptions {
    pub fn from_config(config: &KeyechoConfig) -> Self {
        Self {
            password: false,
            max_short_phrase_len: config.echo.max_short_phrase_len,
            messages: config.messages.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Unchanged,
    Password,
    Composition,
    Selection,
    Text,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Unchanged => write!(f, "unchanged"),
            ChangeKind::Password => write!(f, "password"),
            ChangeKind::Composition => write!(f, "composition"),
            ChangeKind::Selection => write!(f, "selection"),
            ChangeKind::Text => write!(f, "text"),
        }
    }
}

/// Describes changes to one editable field.
///
/// Owns the field's last-seen state. Events must arrive in the order they
/// happened; each call runs to completion and leaves the state equal to the
/// event it was given.
pub struct TextChangeDescriber {
    id: Uuid,
    state: DescriberState,
    options: DescriberOptions,
    typing_echo: TypingEchoFn,
    speech: Box<dyn SpeechOutput + Send>,
    braille: Box<dyn BrailleOutput + Send>,
}

impl fmt::Debug for TextChangeDescriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextChangeDescriber")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("options", &self.options)
            .finish()
    }
}

impl TextChangeDescriber {
    /// Create a describer for a field currently holding `initial_value` with
    /// the given selection. Nothing is spoken or written on construction.
    ///
    /// Starts with character echo, default options and no braille display.
    pub fn new(
        initial_value: impl Into<String>,
        initial_start: usize,
        initial_end: usize,
        multiline: bool,
        speech: impl SpeechOutput + Send + 'static,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: DescriberState::new(initial_value, initial_start, initial_end, multiline),
            options: DescriberOptions::default(),
            typing_echo: echo::fixed(TypingEcho::Character),
            speech: Box::new(speech),
            braille: Box::new(NoBraille),
        }
    }

    pub fn with_braille(mut self, braille: impl BrailleOutput + Send + 'static) -> Self {
        self.braille = Box::new(braille);
        self
    }

    /// Read the typing echo mode through `typing_echo` on every event.
    pub fn with_typing_echo(mut self, typing_echo: TypingEchoFn) -> Self {
        self.typing_echo = typing_echo;
        self
    }

    pub fn with_options(mut self, options: DescriberOptions) -> Self {
        self.options = options;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &DescriberState {
        &self.state
    }

    /// Describe `event` relative to the previous state, speak the result,
    /// then adopt `event` as the new state and mirror it to braille.
    ///
    /// Returns the utterances that were spoken.
    pub fn describe(&mut self, event: TextChangeEvent) -> Vec<Utterance> {
        let echo = (self.typing_echo)();

        let (kind, utterances) = if self.state.matches(&event) {
            (ChangeKind::Unchanged, Vec::new())
        } else if self.options.password {
            (
                ChangeKind::Password,
                vec![Utterance::plain(self.options.messages.password_char.clone())],
            )
        } else if let Some(composition) = event
            .composition()
            .filter(|c| Some(*c) != self.state.composition())
        {
            (
                ChangeKind::Composition,
                self.describe_composition(composition, echo),
            )
        } else if event.value() == self.state.value().as_str() {
            (ChangeKind::Selection, self.describe_selection_change(&event))
        } else {
            let mut utterances = self.describe_text_change(&event, echo);
            if let (Some(committed), None) = (self.state.composition(), event.composition()) {
                // Composed text was already spoken keystroke by keystroke.
                utterances.retain(|u| u.annotation.is_some() || u.text != committed);
            }
            (ChangeKind::Text, utterances)
        };

        if kind == ChangeKind::Unchanged {
            tracing::trace!(describer = %self.id, "Field unchanged");
        } else {
            tracing::debug!(
                describer = %self.id,
                kind = %kind,
                echo = %echo,
                utterances = utterances.len(),
                "Described field change"
            );
        }

        self.speak_all(&utterances, event.triggered_by_user());
        self.state.apply(&event);
        self.braille.write(BrailleContent {
            text: event.value().to_string(),
            start_index: event.start(),
            end_index: event.end(),
        });

        utterances
    }

    fn speak_all(&self, utterances: &[Utterance], triggered_by_user: bool) {
        let mut mode = if triggered_by_user {
            QueueMode::Flush
        } else {
            QueueMode::Queue
        };
        for utterance in utterances {
            self.speech.speak(&utterance.text, mode, utterance.properties());
            mode = QueueMode::Queue;
            if let Some(annotation) = utterance.annotation {
                self.speech.speak(
                    self.options.messages.label(annotation),
                    QueueMode::Queue,
                    SpeechProperties::default(),
                );
            }
        }
    }

    fn describe_composition(&self, composition: &str, echo: TypingEcho) -> Vec<Utterance> {
        let current = Utf16Text::new(composition);
        let previous = Utf16Text::new(self.state.composition().unwrap_or_default());

        if current.len() > previous.len() && current.units().starts_with(previous.units()) {
            if echo == TypingEcho::None {
                return Vec::new();
            }
            return vec![Utterance::plain(
                current.slice(previous.len()..current.len()),
            )];
        }

        if current.len() < previous.len() && previous.units().starts_with(current.units()) {
            if !echo.echoes_characters() {
                return Vec::new();
            }
            return vec![Utterance::erased(
                previous.slice(current.len()..previous.len()),
            )];
        }

        // The IME replaced the composition with a candidate.
        vec![Utterance::phonetic(composition)]
    }

    fn describe_selection_change(&self, event: &TextChangeEvent) -> Vec<Utterance> {
        let value = self.state.value();
        let len = value.len();
        let (old_start, old_end) = self.state.selection();
        let (new_start, new_end) = event.selection();

        if new_start == new_end {
            if new_end == len && !(old_start == len && old_end == len) {
                return vec![Utterance::plain(self.options.messages.end_of_text.clone())];
            }
            return Vec::new();
        }

        if old_start + 1 == new_start && old_end == len && new_end == len {
            // One more character of an autocompleted suggestion was accepted.
            return vec![
                Utterance::plain(value.slice(old_start..new_start)),
                Utterance::plain(value.slice(new_start..len)),
            ];
        }

        let (range, annotation) = if old_start == old_end {
            (new_start..new_end, Annotation::Selected)
        } else if old_start == new_start && old_end < new_end {
            (old_end..new_end, Annotation::AddedToSelection)
        } else if old_start == new_start && old_end > new_end {
            (new_end..old_end, Annotation::RemovedFromSelection)
        } else if old_end == new_end && old_start > new_start {
            (new_start..old_start, Annotation::AddedToSelection)
        } else if old_end == new_end && old_start < new_start {
            (old_start..new_start, Annotation::RemovedFromSelection)
        } else {
            // Both ends moved: read the whole new range rather than two deltas.
            (new_start..new_end, Annotation::Selected)
        };

        vec![Utterance::annotated(value.slice(range), annotation)]
    }

    fn describe_text_change(&self, event: &TextChangeEvent, echo: TypingEcho) -> Vec<Utterance> {
        let old = self.state.value().units();
        let new = event.text().units();
        let (old_start, old_end) = self.state.selection();
        let (new_start, new_end) = event.selection();

        // A selection running to the end of the new value is taken to be an
        // autocomplete suggestion and set aside.
        let (effective_len, effective_end, autocomplete) =
            if new_start < new_end && new_end == new.len() {
                (new_start, new_start, event.text().slice(new_start..new.len()))
            } else {
                (new.len(), new_end, String::new())
            };
        let effective = &new[..effective_len];

        // Text typed or pasted over the old caret or selection.
        let prefix_len = old_start;
        let suffix_len = old.len() - old_end;
        if effective.len() >= prefix_len + suffix_len + (effective_end - new_start)
            && effective[..prefix_len] == old[..prefix_len]
            && effective[effective.len() - suffix_len..] == old[old_end..]
        {
            return self.describe_middle(event, prefix_len, suffix_len, &autocomplete, echo);
        }

        // Backspace, forward delete and similar deletions around the caret.
        if autocomplete.is_empty() && old_start == old_end && new_start == new_end {
            let prefix_len = new_start;
            let suffix_len = new.len() - new_end;
            if old.len() >= prefix_len
                && old.len() >= suffix_len
                && new[..prefix_len] == old[..prefix_len]
                && new[new.len() - suffix_len..] == old[old.len() - suffix_len..]
            {
                return self.describe_middle(event, prefix_len, suffix_len, "", echo);
            }
        }

        // The caret doesn't explain the change; go by the text alone.
        if new.len() > old.len() {
            let grown = new.len() - old.len();
            let added = if new.starts_with(old) {
                Some(old.len()..new.len())
            } else if new.ends_with(old) {
                Some(0..grown)
            } else {
                None
            };
            if let Some(range) = added.filter(|r| char_count(&new[r.clone()]) == 1) {
                return self.echo_character(echo, || Utterance::plain(event.text().slice(range)));
            }
        } else if old.len() > new.len() {
            let shrunk = old.len() - new.len();
            let removed = if old.starts_with(new) {
                Some(new.len()..old.len())
            } else if old.ends_with(new) {
                Some(0..shrunk)
            } else {
                None
            };
            if let Some(range) = removed.filter(|r| char_count(&old[r.clone()]) == 1) {
                if self.state.multiline() {
                    return Vec::new();
                }
                return self.echo_character(echo, || {
                    Utterance::erased(self.state.value().slice(range))
                });
            }
        }

        if self.state.multiline() {
            // Multiline hosts often replace whole chunks of content; guessing
            // here reads far more than the user changed.
            return Vec::new();
        }

        if new.len() <= self.options.max_short_phrase_len {
            return self.describe_middle(event, 0, 0, "", echo);
        }

        let diff = common_affix_diff(old, new).widen_to_word_boundaries(old);
        self.describe_middle(event, diff.prefix_len, diff.suffix_len, "", echo)
    }

    fn echo_character(
        &self,
        echo: TypingEcho,
        utterance: impl FnOnce() -> Utterance,
    ) -> Vec<Utterance> {
        if echo.echoes_characters() {
            vec![utterance()]
        } else {
            Vec::new()
        }
    }

    /// Speak the middle left after removing `prefix_len` and `suffix_len`
    /// units from both the old and new values.
    fn describe_middle(
        &self,
        event: &TextChangeEvent,
        prefix_len: usize,
        suffix_len: usize,
        autocomplete: &str,
        echo: TypingEcho,
    ) -> Vec<Utterance> {
        let old = self.state.value();
        let new = event.text();
        let deleted = middle(old.units(), prefix_len, suffix_len);
        let inserted = middle(new.units(), prefix_len, suffix_len);

        let utterance = match char_count(inserted) {
            0 => self.describe_deletion(deleted, prefix_len, suffix_len, autocomplete, echo),
            1 => {
                if echo.echoes_words()
                    && is_word_break(inserted[0])
                    && prefix_len > 0
                    && !is_word_break(new.units()[prefix_len - 1])
                {
                    // Speak the word just finished, break character included.
                    let start = word_start(new.units(), prefix_len);
                    Some(Utterance::plain(
                        new.slice(start..prefix_len + inserted.len()),
                    ))
                } else if echo.echoes_characters() {
                    Some(Utterance::plain(String::from_utf16_lossy(inserted)))
                } else {
                    None
                }
            }
            _ => Some(Utterance::plain(String::from_utf16_lossy(inserted))),
        };

        let utterance = match (utterance, autocomplete.is_empty()) {
            (utterance, true) => utterance,
            (Some(mut utterance), false) => {
                utterance.text = format!("{}, {}", utterance.text, autocomplete);
                Some(utterance)
            }
            (None, false) => Some(Utterance::plain(autocomplete)),
        };

        utterance.into_iter().collect()
    }

    /// A pure deletion of `deleted`, given the affixes it was found with.
    ///
    /// Removing exactly the old non-empty selection is announced whatever
    /// its length, the echo mode or the field kind.
    fn describe_deletion(
        &self,
        deleted: &[u16],
        prefix_len: usize,
        suffix_len: usize,
        autocomplete: &str,
        echo: TypingEcho,
    ) -> Option<Utterance> {
        let old = self.state.value();
        if deleted.is_empty() {
            return None;
        }
        let deleted_text = String::from_utf16_lossy(deleted);
        if autocomplete.is_empty()
            && self
                .state
                .selection_was(prefix_len, old.len().saturating_sub(suffix_len))
        {
            return Some(Utterance::annotated(deleted_text, Annotation::Deleted));
        }
        if self.state.multiline() {
            return None;
        }
        if char_count(deleted) == 1 {
            return echo
                .echoes_characters()
                .then(|| Utterance::erased(deleted_text));
        }
        if autocomplete.is_empty() && echo != TypingEcho::None {
            Some(Utterance::erased(deleted_text))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::echo::TypingEchoSetting;
    use crate::output::{RecordingBraille, RecordingSpeech};

    fn describer(
        value: &str,
        start: usize,
        end: usize,
        multiline: bool,
        echo: TypingEcho,
    ) -> (TextChangeDescriber, RecordingSpeech) {
        let speech = RecordingSpeech::new();
        let describer = TextChangeDescriber::new(value, start, end, multiline, speech.clone())
            .with_typing_echo(echo::fixed(echo));
        (describer, speech)
    }

    fn change(d: &mut TextChangeDescriber, value: &str, start: usize, end: usize) -> Vec<String> {
        d.describe(TextChangeEvent::new(value, start, end))
            .into_iter()
            .map(|u| u.text)
            .collect()
    }

    #[test]
    fn test_construction_is_silent() {
        let speech = RecordingSpeech::new();
        let braille = RecordingBraille::new();
        let d = TextChangeDescriber::new("abc", 1, 1, false, speech.clone())
            .with_braille(braille.clone());
        assert!(speech.texts().is_empty());
        assert!(braille.writes().is_empty());
        assert_eq!(d.state().selection(), (1, 1));
    }

    #[test]
    fn test_unchanged_event_is_silent_but_refreshes_braille() {
        let speech = RecordingSpeech::new();
        let braille = RecordingBraille::new();
        let mut d = TextChangeDescriber::new("abc", 1, 2, false, speech.clone())
            .with_braille(braille.clone());

        let utterances = d.describe(TextChangeEvent::new("abc", 1, 2));
        assert!(utterances.is_empty());
        assert!(speech.texts().is_empty());
        assert_eq!(
            braille.last(),
            Some(BrailleContent {
                text: "abc".into(),
                start_index: 1,
                end_index: 2
            })
        );
    }

    #[test]
    fn test_character_echo() {
        let (mut d, _) = describer("", 0, 0, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "a", 1, 1), vec!["a"]);
        assert_eq!(change(&mut d, "ab", 2, 2), vec!["b"]);
        assert_eq!(change(&mut d, "ab ", 3, 3), vec![" "]);
    }

    #[test]
    fn test_typing_in_the_middle() {
        let (mut d, _) = describer("helo", 3, 3, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "hello", 4, 4), vec!["l"]);
    }

    #[test]
    fn test_word_echo_includes_trailing_space() {
        let (mut d, _) = describer("Hello", 5, 5, false, TypingEcho::Word);
        assert_eq!(change(&mut d, "Hello ", 6, 6), vec!["Hello "]);
    }

    #[test]
    fn test_word_echo_mid_text_speaks_only_the_finished_word() {
        let (mut d, _) = describer("say hi there", 6, 6, false, TypingEcho::Word);
        assert_eq!(change(&mut d, "say hi, there", 7, 7), vec!["hi,"]);
    }

    #[test]
    fn test_paste_speaks_inserted_text_regardless_of_echo() {
        let (mut d, _) = describer("ab", 1, 1, false, TypingEcho::None);
        assert_eq!(change(&mut d, "aXYZb", 4, 4), vec!["XYZ"]);
    }

    #[test]
    fn test_backspace_speaks_erased_character() {
        let (mut d, speech) = describer("abc", 3, 3, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "ab", 2, 2), vec!["c"]);
        assert!(speech.spoken()[0].properties.deleted);
    }

    #[test]
    fn test_forward_delete_speaks_erased_character() {
        let (mut d, _) = describer("abc", 1, 1, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "ac", 1, 1), vec!["b"]);
    }

    #[test]
    fn test_word_delete_speaks_erased_word() {
        let (mut d, speech) = describer("hello world", 11, 11, false, TypingEcho::Word);
        assert_eq!(change(&mut d, "hello ", 6, 6), vec!["world"]);
        assert_eq!(speech.texts(), vec!["world"]);
    }

    #[test]
    fn test_single_deletion_not_echoed_in_word_mode() {
        let (mut d, _) = describer("abc", 3, 3, false, TypingEcho::Word);
        assert!(change(&mut d, "ab", 2, 2).is_empty());
    }

    #[test]
    fn test_deleting_selection_is_announced() {
        let (mut d, speech) = describer("hello world", 5, 11, false, TypingEcho::None);
        let utterances = d.describe(TextChangeEvent::new("hello", 5, 5));
        assert_eq!(utterances.len(), 1);
        assert_eq!(utterances[0].annotation, Some(Annotation::Deleted));
        assert_eq!(speech.texts(), vec![" world", "deleted"]);
    }

    #[test]
    fn test_deleting_one_character_selection_is_announced() {
        for echo in [TypingEcho::None, TypingEcho::Character, TypingEcho::Word] {
            let (mut d, speech) = describer("abc", 1, 2, false, echo);
            let utterances = d.describe(TextChangeEvent::new("ac", 1, 1));
            assert_eq!(utterances.len(), 1, "echo {}", echo);
            assert_eq!(utterances[0].text, "b");
            assert_eq!(utterances[0].annotation, Some(Annotation::Deleted));
            assert!(utterances[0].deleted_voice);
            assert_eq!(speech.texts(), vec!["b", "deleted"]);
        }
    }

    #[test]
    fn test_deleting_selection_in_multiline_is_announced() {
        let (mut d, speech) = describer("one\ntwo", 4, 7, true, TypingEcho::Character);
        let utterances = d.describe(TextChangeEvent::new("one\n", 4, 4));
        assert_eq!(utterances[0].annotation, Some(Annotation::Deleted));
        assert_eq!(speech.texts(), vec!["two", "deleted"]);
    }

    #[test]
    fn test_surrogate_pair_counts_as_one_character() {
        let (mut d, _) = describer("a", 1, 1, false, TypingEcho::None);
        assert!(change(&mut d, "a😀", 3, 3).is_empty());

        let (mut d, _) = describer("a", 1, 1, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "a😀", 3, 3), vec!["😀"]);
        assert_eq!(change(&mut d, "a", 1, 1), vec!["😀"]);

        let (mut d, _) = describer("hi😀", 4, 4, false, TypingEcho::Word);
        assert!(change(&mut d, "hi", 2, 2).is_empty());
    }

    #[test]
    fn test_surrogate_pair_added_without_caret() {
        let (mut d, _) = describer("ab", 0, 0, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "ab😀", 0, 0), vec!["😀"]);

        let (mut d, _) = describer("ab", 0, 0, false, TypingEcho::None);
        assert!(change(&mut d, "😀ab", 0, 0).is_empty());
        assert!(change(&mut d, "ab", 0, 0).is_empty());
    }

    #[test]
    fn test_multiline_deletion_is_silent() {
        let (mut d, _) = describer("line one\nline two", 17, 17, true, TypingEcho::Character);
        assert!(change(&mut d, "line one\nline tw", 16, 16).is_empty());
        assert!(change(&mut d, "line one\n", 9, 9).is_empty());
    }

    #[test]
    fn test_multiline_insertion_still_echoes() {
        let (mut d, _) = describer("line", 4, 4, true, TypingEcho::Character);
        assert_eq!(change(&mut d, "lines", 5, 5), vec!["s"]);
    }

    #[test]
    fn test_selection_extend_and_shrink() {
        let (mut d, speech) = describer("hello world", 0, 0, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "hello world", 0, 5), vec!["hello"]);
        assert_eq!(change(&mut d, "hello world", 0, 7), vec![" w"]);
        assert_eq!(change(&mut d, "hello world", 0, 6), vec!["w"]);
        assert_eq!(
            speech.texts(),
            vec![
                "hello",
                "selected",
                " w",
                "added to selection",
                "w",
                "removed from selection"
            ]
        );
    }

    #[test]
    fn test_selection_extend_backwards() {
        let (mut d, _) = describer("hello world", 6, 11, false, TypingEcho::Character);
        let utterances = d.describe(TextChangeEvent::new("hello world", 4, 11));
        assert_eq!(utterances[0].text, "o ");
        assert_eq!(utterances[0].annotation, Some(Annotation::AddedToSelection));

        let utterances = d.describe(TextChangeEvent::new("hello world", 8, 11));
        assert_eq!(utterances[0].text, "o wo");
        assert_eq!(
            utterances[0].annotation,
            Some(Annotation::RemovedFromSelection)
        );
    }

    #[test]
    fn test_disjoint_selection_reads_new_range() {
        let (mut d, _) = describer("one two three", 0, 3, false, TypingEcho::Character);
        let utterances = d.describe(TextChangeEvent::new("one two three", 8, 13));
        assert_eq!(utterances[0].text, "three");
        assert_eq!(utterances[0].annotation, Some(Annotation::Selected));
    }

    #[test]
    fn test_caret_moves_are_silent_except_end_of_text() {
        let (mut d, _) = describer("abc", 0, 0, false, TypingEcho::Character);
        assert!(change(&mut d, "abc", 1, 1).is_empty());
        assert_eq!(change(&mut d, "abc", 3, 3), vec!["End of text"]);
        assert!(change(&mut d, "abc", 0, 0).is_empty());
    }

    #[test]
    fn test_collapsing_selection_is_silent() {
        let (mut d, _) = describer("abc", 0, 2, false, TypingEcho::Character);
        assert!(change(&mut d, "abc", 1, 1).is_empty());
    }

    #[test]
    fn test_autocomplete_advance_within_selection() {
        let (mut d, _) = describer("google.com", 1, 10, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "google.com", 2, 10), vec!["o", "ogle.com"]);
    }

    #[test]
    fn test_first_utterance_flushes_rest_queue() {
        let (mut d, speech) = describer("ab", 0, 0, false, TypingEcho::Character);
        d.describe(TextChangeEvent::new("ab", 0, 2));
        let spoken = speech.take();
        assert_eq!(spoken[0].mode, QueueMode::Flush);
        assert_eq!(spoken[1].mode, QueueMode::Queue);

        d.describe(TextChangeEvent::new("abc", 3, 3).not_user_triggered());
        assert_eq!(speech.take()[0].mode, QueueMode::Queue);
    }

    #[test]
    fn test_password_field_speaks_placeholder() {
        let (d, speech) = describer("", 0, 0, false, TypingEcho::Character);
        let mut d = d.with_options(DescriberOptions {
            password: true,
            ..DescriberOptions::default()
        });
        assert_eq!(change(&mut d, "s", 1, 1), vec!["dot"]);
        assert_eq!(change(&mut d, "se", 2, 2), vec!["dot"]);
        assert!(change(&mut d, "se", 2, 2).is_empty());
        assert!(!speech.texts().iter().any(|t| t.contains('s')));
    }

    #[test]
    fn test_localized_labels() {
        let (d, speech) = describer("abc", 0, 0, false, TypingEcho::Character);
        let mut messages = MessageConfig::default();
        messages.selected = "ausgewählt".to_string();
        let mut d = d.with_options(DescriberOptions {
            messages,
            ..DescriberOptions::default()
        });
        d.describe(TextChangeEvent::new("abc", 0, 3));
        assert_eq!(speech.texts(), vec!["abc", "ausgewählt"]);
    }

    #[test]
    fn test_echo_setting_read_per_event() {
        let setting = TypingEchoSetting::new(TypingEcho::None);
        let speech = RecordingSpeech::new();
        let mut d = TextChangeDescriber::new("", 0, 0, false, speech.clone())
            .with_typing_echo(setting.accessor());

        assert!(change(&mut d, "a", 1, 1).is_empty());
        setting.set(TypingEcho::Character);
        assert_eq!(change(&mut d, "ab", 2, 2), vec!["b"]);
    }

    #[test]
    fn test_short_value_replaced_wholesale() {
        let (mut d, _) = describer("abc", 1, 1, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "xyz", 0, 0), vec!["xyz"]);
    }

    #[test]
    fn test_one_character_added_at_start_without_caret() {
        let (mut d, _) = describer("bc", 2, 2, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "abc", 3, 3), vec!["a"]);
    }

    #[test]
    fn test_one_character_removed_at_start_without_caret() {
        let (mut d, _) = describer("abc", 3, 3, false, TypingEcho::Character);
        assert_eq!(change(&mut d, "bc", 2, 2), vec!["a"]);
    }

    #[test]
    fn test_composition_speaks_new_characters_only() {
        let (mut d, speech) = describer("", 0, 0, false, TypingEcho::Character);
        d.describe(TextChangeEvent::new("か", 1, 1).with_composition("か"));
        d.describe(TextChangeEvent::new("かん", 2, 2).with_composition("かん"));
        d.describe(TextChangeEvent::new("かんじ", 3, 3).with_composition("かんじ"));
        assert_eq!(speech.take_texts(), vec!["か", "ん", "じ"]);

        let utterances = d.describe(TextChangeEvent::new("漢字", 2, 2).with_composition("漢字"));
        assert_eq!(utterances, vec![Utterance::phonetic("漢字")]);
        assert!(speech.take()[0].properties.phonetic_characters);

        // Committing leaves the text as it is; nothing new to say.
        assert!(d.describe(TextChangeEvent::new("漢字", 2, 2)).is_empty());
        assert_eq!(d.state().composition(), None);
    }

    #[test]
    fn test_composition_commit_with_changed_value_is_suppressed() {
        let (mut d, _) = describer("a", 1, 1, false, TypingEcho::Character);
        d.describe(TextChangeEvent::new("a", 1, 1).with_composition("に"));
        // Host reports the committed text landing in the field.
        assert!(change(&mut d, "aに", 2, 2).is_empty());
    }

    #[test]
    fn test_composition_backspace() {
        let (mut d, _) = describer("", 0, 0, false, TypingEcho::Character);
        d.describe(TextChangeEvent::new("かん", 2, 2).with_composition("かん"));
        let utterances = d.describe(TextChangeEvent::new("か", 1, 1).with_composition("か"));
        assert_eq!(utterances, vec![Utterance::erased("ん")]);
    }

    #[test]
    fn test_composition_silent_without_echo() {
        let (mut d, _) = describer("", 0, 0, false, TypingEcho::None);
        assert!(d
            .describe(TextChangeEvent::new("か", 1, 1).with_composition("か"))
            .is_empty());
    }

    #[test]
    fn test_out_of_range_offsets_do_not_panic() {
        let (mut d, _) = describer("abc", 10, 20, false, TypingEcho::Character);
        assert_eq!(d.state().selection(), (3, 3));
        change(&mut d, "", 5, 9);
        change(&mut d, "zz", 100, 0);
        change(&mut d, "zz", 0, 100);
        let event = TextChangeEvent::from_signed("z", -3, -1);
        d.describe(event);
        assert_eq!(d.state().selection(), (0, 0));
    }

    #[test]
    fn test_options_from_config() {
        let mut config = KeyechoConfig::default();
        config.echo.max_short_phrase_len = 5;
        config.messages.deleted = "gelöscht".to_string();
        let options = DescriberOptions::from_config(&config);
        assert_eq!(options.max_short_phrase_len, 5);
        assert_eq!(options.messages.deleted, "gelöscht");
        assert!(!options.password);
    }
}
