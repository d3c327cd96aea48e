//! Assistant orchestration for KiongoziCare.
//!
//! Wires speech input, the response matcher and speech output together and
//! exposes the shared state that a front end reads to render itself.
//!
//! # Architecture
//!
//! ```text
//! AssistantCommand (mpsc)
//!        │
//!        ▼
//! AssistantOrchestrator::run()  ← async tokio task
//!        │
//!        ├─ Listen          → SpeechListener::listen (with timeout)
//!        ├─ Ask(text)       → ResponseMatcher::match_text
//!        │                    → SpeechSynthesizer::speak (voice on)
//!        ├─ SelectTopic(id) → KnowledgeBase::get
//!        ├─ ListTopics      → KnowledgeBase::topics
//!        └─ Stop            → SpeechSynthesizer::stop (cancels Listen/Ask)
//!
//! SharedState (Arc<Mutex<AssistantState>>) ←── read by the front end
//! AssistantEvent (mpsc)                    ──▶ optional progress stream
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use kiongozi_care::assistant::{new_shared_state, AssistantCommand, AssistantOrchestrator};
//! use kiongozi_care::config::AppConfig;
//! use kiongozi_care::knowledge;
//! use kiongozi_care::speech::{LogSynthesizer, ScriptedListener};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let orchestrator = AssistantOrchestrator::new(
//!         new_shared_state(config),
//!         knowledge::install().unwrap(),
//!         Arc::new(ScriptedListener::default()),
//!         Arc::new(LogSynthesizer),
//!     );
//!
//!     let (command_tx, command_rx) = mpsc::channel(16);
//!     let task = tokio::spawn(orchestrator.run(command_rx));
//!
//!     command_tx.send(AssistantCommand::Ask("my hand is bleeding".into())).await.unwrap();
//!     drop(command_tx);
//!     task.await.unwrap();
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{
    AssistantCommand, AssistantError, AssistantEvent, AssistantOrchestrator,
    LISTEN_ERROR_MESSAGE, SPEAK_ERROR_MESSAGE,
};
pub use state::{new_shared_state, AssistantPhase, AssistantState, SharedState};
