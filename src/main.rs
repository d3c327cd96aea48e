//! Application entry point for the KiongoziCare first-aid assistant.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Validate and install the built-in knowledge base; exit on failure.
//! 4. Create [`tokio`] runtime.
//! 5. Build the speech collaborators from config.
//! 6. Spawn the assistant orchestrator and the event printer.
//! 7. Read stdin one line at a time until EOF.
//!
//! # Input lines
//!
//! | Line            | Command                          |
//! |-----------------|----------------------------------|
//! | `:topics`       | list topic ids and titles        |
//! | `:topic <id>`   | show one topic's instructions    |
//! | `:listen`       | answer the scripted demo phrase  |
//! | `:stop`         | stop speaking                    |
//! | anything else   | match it as a question           |
//!
//! Pass `--json` to print each answer as a JSON object.

use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use kiongozi_care::{
    assistant::{new_shared_state, AssistantCommand, AssistantEvent, AssistantOrchestrator},
    config::AppConfig,
    knowledge,
    speech::{LogSynthesizer, ScriptedListener, SilentSynthesizer, SpeechSynthesizer},
};

// ---------------------------------------------------------------------------
// Command-line options
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct CliOptions {
    json: bool,
}

impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut opts = Self::default();
        for arg in args {
            match arg.as_str() {
                "--json" => opts.json = true,
                other => bail!("unknown argument: {other} (usage: kiongozi-care [--json])"),
            }
        }
        Ok(opts)
    }
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum InputLine {
    Command(AssistantCommand),
    /// A malformed directive; the message goes to stderr.
    Invalid(String),
}

/// Map one stdin line to what the front end should do.  Blank lines are
/// skipped.
fn parse_line(line: &str) -> Option<InputLine> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let command = match trimmed {
        ":topics" => AssistantCommand::ListTopics,
        ":listen" => AssistantCommand::Listen,
        ":stop" => AssistantCommand::Stop,
        _ => match trimmed.strip_prefix(":topic") {
            Some("") => {
                return Some(InputLine::Invalid(
                    ":topic needs a topic id (see :topics)".to_string(),
                ))
            }
            Some(rest) if rest.starts_with(char::is_whitespace) => {
                AssistantCommand::SelectTopic(rest.trim().to_string())
            }
            _ => AssistantCommand::Ask(line.to_string()),
        },
    };
    Some(InputLine::Command(command))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Print assistant events until the orchestrator drops its sender.
async fn print_events(mut event_rx: mpsc::Receiver<AssistantEvent>, json: bool) {
    while let Some(event) = event_rx.recv().await {
        match event {
            AssistantEvent::Answered { result } => {
                if json {
                    match serde_json::to_string(&result) {
                        Ok(line) => println!("{line}"),
                        Err(e) => log::error!("failed to serialise answer: {e}"),
                    }
                } else {
                    println!("{}\n", result.message());
                }
            }
            AssistantEvent::Selected { topic_id, response } => {
                if json {
                    let value = serde_json::json!({
                        "kind": "selected",
                        "topic_id": topic_id,
                        "response": response,
                    });
                    println!("{value}");
                } else {
                    println!("{response}\n");
                }
            }
            AssistantEvent::Topics { topics } => {
                if json {
                    let entries: Vec<_> = topics
                        .iter()
                        .map(|(id, title)| serde_json::json!({ "id": id, "title": title }))
                        .collect();
                    println!("{}", serde_json::json!({ "kind": "topics", "topics": entries }));
                } else {
                    for (id, title) in &topics {
                        println!("{id:<12} {title}");
                    }
                    println!();
                }
            }
            AssistantEvent::Transcribed { text } => eprintln!("heard: {text}"),
            AssistantEvent::Error { message } => eprintln!("error: {message}"),
            AssistantEvent::Listening => log::debug!("listening"),
            AssistantEvent::Stopped => log::debug!("stopped"),
        }
        let _ = std::io::stdout().flush();
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("KiongoziCare starting up");

    let opts = CliOptions::parse(std::env::args().skip(1))?;

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Knowledge base
    let kb = match knowledge::install() {
        Ok(kb) => kb,
        Err(e) => {
            log::error!("Knowledge base rejected: {e}");
            std::process::exit(2);
        }
    };

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // 5. Speech collaborators
    let listener = Arc::new(ScriptedListener::new(config.listen.demo_phrase.clone()));
    let synthesizer: Arc<dyn SpeechSynthesizer> = if config.speech.enabled {
        Arc::new(LogSynthesizer)
    } else {
        Arc::new(SilentSynthesizer)
    };

    rt.block_on(async move {
        // 6. Orchestrator and event printer
        let (command_tx, command_rx) = mpsc::channel::<AssistantCommand>(16);
        let (event_tx, event_rx) = mpsc::channel::<AssistantEvent>(32);

        let orchestrator =
            AssistantOrchestrator::new(new_shared_state(config), kb, listener, synthesizer)
                .with_events(event_tx);
        let assistant = tokio::spawn(orchestrator.run(command_rx));
        let printer = tokio::spawn(print_events(event_rx, opts.json));

        // 7. Input loop
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
            match parse_line(&line) {
                None => {}
                Some(InputLine::Invalid(message)) => eprintln!("error: {message}"),
                Some(InputLine::Command(cmd)) => {
                    if command_tx.send(cmd).await.is_err() {
                        log::warn!("assistant stopped; ignoring remaining input");
                        break;
                    }
                }
            }
        }

        drop(command_tx);
        assistant.await.context("assistant task failed")?;
        printer.await.context("printer task failed")?;
        Ok::<(), anyhow::Error>(())
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_flag() {
        let opts = CliOptions::parse(vec!["--json".to_string()]).unwrap();
        assert!(opts.json);
        assert!(!CliOptions::parse(Vec::new()).unwrap().json);
        assert!(CliOptions::parse(vec!["--yaml".to_string()]).is_err());
    }

    #[test]
    fn parse_directives() {
        assert_eq!(
            parse_line(":topics"),
            Some(InputLine::Command(AssistantCommand::ListTopics))
        );
        assert_eq!(
            parse_line(":topic  cpr "),
            Some(InputLine::Command(AssistantCommand::SelectTopic("cpr".into())))
        );
        assert_eq!(
            parse_line(":listen"),
            Some(InputLine::Command(AssistantCommand::Listen))
        );
        assert_eq!(
            parse_line(":stop"),
            Some(InputLine::Command(AssistantCommand::Stop))
        );
    }

    #[test]
    fn topic_accepts_any_whitespace_separator() {
        assert_eq!(
            parse_line(":topic\tcpr"),
            Some(InputLine::Command(AssistantCommand::SelectTopic("cpr".into())))
        );
    }

    #[test]
    fn topic_without_id_is_rejected() {
        assert!(matches!(parse_line(":topic"), Some(InputLine::Invalid(_))));
        assert!(matches!(parse_line("  :topic   "), Some(InputLine::Invalid(_))));
    }

    #[test]
    fn other_lines_are_questions() {
        assert_eq!(
            parse_line(":topicburn"),
            Some(InputLine::Command(AssistantCommand::Ask(":topicburn".into())))
        );
        assert_eq!(
            parse_line("Someone is CHOKING!"),
            Some(InputLine::Command(AssistantCommand::Ask(
                "Someone is CHOKING!".into()
            )))
        );
        assert_eq!(parse_line("   "), None);
    }
}
