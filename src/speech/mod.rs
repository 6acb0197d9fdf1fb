//! Speech input and output channels
//!
//! Recognition and synthesis are external capabilities reached through
//! `SpeechRecognizer` and `SpeechSynthesizer`. The channels wrap them with
//! the behaviour a session relies on:
//! - `SpeechInput`: one-shot capture, lower-cased result
//! - `SpeechOutput`: newest utterance preempts the one playing

mod capability;
mod command;
mod console;
mod input;
mod output;

pub use capability::{RecognizerConfig, SpeechRecognizer, SpeechSynthesizer, VoiceSettings};
pub use command::CommandSynthesizer;
pub use console::{
    ConsoleInput, ConsoleRecognizer, ConsoleSynthesizer, ForwardedRecognition, NoSynthesizer,
};
pub use input::SpeechInput;
pub use output::{SpeechOutput, PROBE_PHRASE};
