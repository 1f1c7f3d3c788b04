//! keyecho describer crate - spoken feedback for edits to a text field.
//!
//! A [`TextChangeDescriber`] is created per focused editable field. The host
//! feeds it a [`TextChangeEvent`] after every edit or selection change; the
//! describer works out what changed, speaks it through a [`SpeechOutput`] and
//! mirrors the field to a [`BrailleOutput`].

pub mod describer;
pub mod diff;
pub mod echo;
pub mod event;
pub mod output;
pub mod state;
pub mod text;

pub use describer::{DescriberOptions, TextChangeDescriber};
pub use diff::{common_affix_diff, AffixDiff};
pub use echo::{TypingEchoFn, TypingEchoSetting};
pub use event::TextChangeEvent;
pub use output::{
    BrailleOutput, NoBraille, RecordingBraille, RecordingSpeech, SpeechOutput, SpokenText,
};
pub use state::DescriberState;
pub use text::Utf16Text;
