//! Interactive console conversation
//!
//! The terminal stands in for the browser page: an empty line starts a
//! capture, and the line typed after the microphone prompt is what the
//! recognizer "heard".

use crate::config::Config;
use crate::session::ConversationSession;
use crate::speech::ConsoleInput;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// A line typed at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Start a capture
    Talk,
    /// End the interaction and analyze it
    End,
    /// Export the transcript, optionally to a given path
    Export(Option<String>),
    Participant(i64),
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Talk;
        }

        let mut parts = line.splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).filter(|a| !a.is_empty());

        match (command, argument) {
            ("/talk", _) => Self::Talk,
            ("/end", _) => Self::End,
            ("/export", path) => Self::Export(path.map(str::to_string)),
            ("/participant", Some(id)) => match id.parse() {
                Ok(id) => Self::Participant(id),
                Err(_) => Self::Unknown(line.to_string()),
            },
            ("/status", _) => Self::Status,
            ("/help", _) => Self::Help,
            ("/quit", _) | ("/exit", _) => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
  <enter> or /talk     start listening (type what you say on the next line)
  /end                 end the interaction and analyze it
  /export [path]       save the transcript
  /participant <id>    select the participant
  /status              show session statistics
  /quit                leave";

/// Run the chat loop until `/quit` or end of input
pub async fn run(
    session: &Arc<ConversationSession>,
    console: &ConsoleInput,
    config: &Config,
) -> Result<()> {
    info!("Chat session {} started", session.session_id());
    session.probe_speech().await;
    println!("{HELP}");

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = console.next_line().await? else {
            break;
        };

        match ChatCommand::parse(&line) {
            // Failures were already shown to the user by the session
            ChatCommand::Talk => {
                let _ = session.start_capture().await;
            }
            ChatCommand::End => {
                let _ = session.analyze().await;
            }
            ChatCommand::Export(path) => {
                let path = path.unwrap_or_else(|| config.session.export_file.clone());
                let expanded = shellexpand::tilde(&path).into_owned();
                let transcript = session.get_transcript().await;
                match transcript
                    .export_to(&expanded)
                    .with_context(|| format!("Failed to write {expanded}"))
                {
                    Ok(()) => println!("Saved {} lines to {}", transcript.len(), expanded),
                    Err(e) => {
                        warn!("{:#}", e);
                        eprintln!("⚠️  {e:#}");
                    }
                }
            }
            ChatCommand::Participant(id) => {
                session.participant().select(id);
                println!("Participant {id} selected");
            }
            ChatCommand::Status => {
                let stats = session.get_stats().await;
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            ChatCommand::Help => println!("{HELP}"),
            ChatCommand::Quit => break,
            ChatCommand::Unknown(line) => println!("Unknown command: {line} (try /help)"),
        }
    }

    info!("Chat session {} finished", session.session_id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_starts_capture() {
        assert_eq!(ChatCommand::parse(""), ChatCommand::Talk);
        assert_eq!(ChatCommand::parse("   "), ChatCommand::Talk);
        assert_eq!(ChatCommand::parse("/talk"), ChatCommand::Talk);
    }

    #[test]
    fn test_export_with_and_without_path() {
        assert_eq!(ChatCommand::parse("/export"), ChatCommand::Export(None));
        assert_eq!(
            ChatCommand::parse("/export  ~/llamada.txt "),
            ChatCommand::Export(Some("~/llamada.txt".to_string()))
        );
    }

    #[test]
    fn test_participant_requires_integer() {
        assert_eq!(ChatCommand::parse("/participant 7"), ChatCommand::Participant(7));
        assert_eq!(
            ChatCommand::parse("/participant siete"),
            ChatCommand::Unknown("/participant siete".to_string())
        );
        assert_eq!(
            ChatCommand::parse("/participant"),
            ChatCommand::Unknown("/participant".to_string())
        );
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(ChatCommand::parse("/end"), ChatCommand::End);
        assert_eq!(ChatCommand::parse("/status"), ChatCommand::Status);
        assert_eq!(ChatCommand::parse("/quit"), ChatCommand::Quit);
        assert_eq!(ChatCommand::parse("/exit"), ChatCommand::Quit);
        assert_eq!(
            ChatCommand::parse("hola"),
            ChatCommand::Unknown("hola".to_string())
        );
    }
}
