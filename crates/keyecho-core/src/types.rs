//! Shared vocabulary between the describer, its collaborators and the host.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KeyechoError;

/// Which insertions get spoken while typing.
///
/// Selection announcements and multi-character deletion announcements are
/// never gated by this setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypingEcho {
    /// Speak every typed character.
    #[default]
    Character,
    /// Speak each word once it is finished.
    Word,
    /// Speak characters as typed and each finished word.
    CharacterAndWord,
    /// Speak nothing while typing.
    None,
}

impl TypingEcho {
    /// Whether single typed (or erased) characters are spoken.
    pub fn echoes_characters(self) -> bool {
        matches!(self, TypingEcho::Character | TypingEcho::CharacterAndWord)
    }

    /// Whether finished words are spoken.
    pub fn echoes_words(self) -> bool {
        matches!(self, TypingEcho::Word | TypingEcho::CharacterAndWord)
    }
}

impl fmt::Display for TypingEcho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypingEcho::Character => write!(f, "character"),
            TypingEcho::Word => write!(f, "word"),
            TypingEcho::CharacterAndWord => write!(f, "character_and_word"),
            TypingEcho::None => write!(f, "none"),
        }
    }
}

impl FromStr for TypingEcho {
    type Err = KeyechoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "character" => Ok(TypingEcho::Character),
            "word" => Ok(TypingEcho::Word),
            "character_and_word" => Ok(TypingEcho::CharacterAndWord),
            "none" => Ok(TypingEcho::None),
            other => Err(KeyechoError::Config(format!(
                "Unknown typing echo mode: {}",
                other
            ))),
        }
    }
}

/// How a new utterance interacts with whatever the speech engine is saying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueMode {
    /// Interrupt current speech.
    Flush,
    /// Speak after current speech finishes.
    Queue,
}

impl fmt::Display for QueueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueMode::Flush => write!(f, "flush"),
            QueueMode::Queue => write!(f, "queue"),
        }
    }
}

/// Extra hints passed along with spoken text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpeechProperties {
    /// Speak characters phonetically ("a as in alpha").
    pub phonetic_characters: bool,
    /// Use the voice reserved for deleted text, where the engine has one.
    pub deleted: bool,
}

/// Label spoken after an utterance's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    Selected,
    AddedToSelection,
    RemovedFromSelection,
    Deleted,
}

/// One piece of spoken feedback produced for a text change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub annotation: Option<Annotation>,
    #[serde(default)]
    pub phonetic_characters: bool,
    #[serde(default)]
    pub deleted_voice: bool,
}

impl Utterance {
    /// Plain text with no annotation.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotation: None,
            phonetic_characters: false,
            deleted_voice: false,
        }
    }

    /// Text followed by an annotation label.
    pub fn annotated(text: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            annotation: Some(annotation),
            deleted_voice: annotation == Annotation::Deleted,
            ..Self::plain(text)
        }
    }

    /// Text to be spoken phonetically.
    pub fn phonetic(text: impl Into<String>) -> Self {
        Self {
            phonetic_characters: true,
            ..Self::plain(text)
        }
    }

    /// Text erased by the user, spoken in the deleted voice.
    pub fn erased(text: impl Into<String>) -> Self {
        Self {
            deleted_voice: true,
            ..Self::plain(text)
        }
    }

    /// Properties the speech engine should use for this utterance's text.
    pub fn properties(&self) -> SpeechProperties {
        SpeechProperties {
            phonetic_characters: self.phonetic_characters,
            deleted: self.deleted_voice,
        }
    }
}

/// What a braille display should show after a change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrailleContent {
    pub text: String,
    pub start_index: usize,
    pub end_index: usize,
}
