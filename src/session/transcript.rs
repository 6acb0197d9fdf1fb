use serde::{Deserialize, Serialize};
use std::path::Path;

/// Who spoke an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Label used in exported transcripts
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "Usuario",
            Role::Bot => "Bot",
        }
    }
}

/// A single recorded turn of dialogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    role: Role,
    text: String,
}

impl Utterance {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only, insertion-ordered log of utterances
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, utterance: Utterance) {
        self.utterances.push(utterance);
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Utterance> {
        self.utterances.iter()
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.utterances.last()
    }

    /// Every utterance's text joined by single spaces, roles ignored
    ///
    /// This is the payload sent to the analysis endpoint.
    pub fn conversation_text(&self) -> String {
        self.utterances
            .iter()
            .map(Utterance::text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Flat text export, one `"<Label>: <text>"` line per utterance
    ///
    /// Each line break inside an utterance (`\n`, `\r\n` or `\r`) becomes
    /// one space, so the export always has exactly one line per utterance.
    pub fn export(&self) -> String {
        self.utterances
            .iter()
            .map(|u| {
                let text = u.text.replace("\r\n", " ").replace(['\n', '\r'], " ");
                format!("{}: {}", u.role.label(), text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Write the flat export to `path`
    pub fn export_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, self.export())
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Utterance;
    type IntoIter = std::slice::Iter<'a, Utterance>;

    fn into_iter(self) -> Self::IntoIter {
        self.utterances.iter()
    }
}
