//! Assistant orchestrator: text or speech in, instructions out.
//!
//! [`AssistantOrchestrator`] owns the [`SharedState`] and responds to
//! [`AssistantCommand`]s received over a `tokio::sync::mpsc` channel.
//!
//! # Flow
//!
//! ```text
//! Listen
//!   └─▶ timeout(listener.listen())                    [Listening]
//!         ├─ Ok(text) → Ask(text)
//!         └─ Err      → "Error with voice assistant"    [Error]
//!
//! Ask(text)
//!   └─▶ ResponseMatcher::match_text                   [Processing]
//!         └─▶ voice on → synthesizer.speak(message)   [Speaking]
//!               └─ Err → "Error speaking response", answer kept
//!         └─▶                                         [Result]
//!
//! SelectTopic(id) ─▶ topic response, no scoring       [Result]
//! ListTopics      ─▶ ids and titles, state untouched
//! Stop            ─▶ synthesizer.stop()               [Idle]
//! ```
//!
//! Commands are handled one at a time.  While a `Listen` or `Ask` is in
//! flight, [`run`](AssistantOrchestrator::run) keeps reading the channel: a
//! `Stop` cancels the request in progress, anything else is queued behind it.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::knowledge::KnowledgeBase;
use crate::matcher::{MatchResult, NormalizedQuery, ResponseMatcher};
use crate::speech::{SpeechError, SpeechListener, SpeechSynthesizer};

use super::state::{AssistantPhase, AssistantState, SharedState};

/// Shown when listening fails or times out.
pub const LISTEN_ERROR_MESSAGE: &str = "Error with voice assistant";
/// Shown alongside the answer when reading it aloud fails.
pub const SPEAK_ERROR_MESSAGE: &str = "Error speaking response";

// ---------------------------------------------------------------------------
// AssistantError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantError {
    /// A quick-select request named a topic the knowledge base lacks.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// The speech listener failed or timed out.
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

// ---------------------------------------------------------------------------
// Commands and events
// ---------------------------------------------------------------------------

/// Requests sent from the presentation layer to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantCommand {
    /// Match typed (or externally transcribed) text.
    Ask(String),
    /// Capture an utterance from the speech listener, then match it.
    Listen,
    /// Show one topic's instructions directly (category card).
    SelectTopic(String),
    /// Report every topic id and title in catalogue order.
    ListTopics,
    /// Interrupt speech (or listening) and return to idle.
    Stop,
}

/// Progress notifications delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantEvent {
    Listening,
    Transcribed { text: String },
    Answered { result: MatchResult },
    Selected { topic_id: String, response: String },
    /// `(id, title)` pairs in catalogue order.
    Topics { topics: Vec<(String, String)> },
    Error { message: String },
    Stopped,
}

// ---------------------------------------------------------------------------
// AssistantOrchestrator
// ---------------------------------------------------------------------------

/// Drives the assistant.
///
/// Use [`ask`](Self::ask) directly for a single request/response exchange,
/// or spawn [`run`](Self::run) to serve a command channel.
///
/// ```rust
/// use std::sync::Arc;
/// use kiongozi_care::assistant::{new_shared_state, AssistantOrchestrator};
/// use kiongozi_care::config::AppConfig;
/// use kiongozi_care::knowledge;
/// use kiongozi_care::speech::{ScriptedListener, SilentSynthesizer};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let orchestrator = AssistantOrchestrator::new(
///     new_shared_state(AppConfig::default()),
///     knowledge::install().unwrap(),
///     Arc::new(ScriptedListener::default()),
///     Arc::new(SilentSynthesizer),
/// );
/// let result = orchestrator.ask("someone is choking").await;
/// assert_eq!(result.topic_id(), Some("choking"));
/// # }
/// ```
pub struct AssistantOrchestrator {
    state: SharedState,
    matcher: ResponseMatcher<'static>,
    listener: Arc<dyn SpeechListener>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    events: Option<mpsc::Sender<AssistantEvent>>,
}

impl AssistantOrchestrator {
    pub fn new(
        state: SharedState,
        kb: &'static KnowledgeBase,
        listener: Arc<dyn SpeechListener>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            state,
            matcher: ResponseMatcher::new(kb),
            listener,
            synthesizer,
            events: None,
        }
    }

    /// Deliver [`AssistantEvent`]s to `tx`.
    pub fn with_events(mut self, tx: mpsc::Sender<AssistantEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Serve `command_rx` until it is closed.
    pub async fn run(self, mut command_rx: mpsc::Receiver<AssistantCommand>) {
        let mut backlog = VecDeque::new();

        loop {
            let command = match backlog.pop_front() {
                Some(command) => command,
                None => match command_rx.recv().await {
                    Some(command) => command,
                    None => break,
                },
            };

            match command {
                AssistantCommand::Ask(text) => {
                    self.interruptible(self.ask(&text), &mut command_rx, &mut backlog)
                        .await;
                }
                AssistantCommand::Listen => {
                    // Failure is already recorded in the shared state.
                    let _ = self
                        .interruptible(self.listen(), &mut command_rx, &mut backlog)
                        .await;
                }
                AssistantCommand::SelectTopic(id) => {
                    let _ = self.select_topic(&id).await;
                }
                AssistantCommand::ListTopics => {
                    self.list_topics().await;
                }
                AssistantCommand::Stop => self.stop().await,
            }
        }

        log::info!("assistant: command channel closed, orchestrator shutting down");
    }

    /// Drive `work` to completion while watching `command_rx`.
    ///
    /// A `Stop` drops `work` and stops the synthesizer; the answer recorded
    /// so far stays in the shared state.  Other commands go to `backlog` in
    /// arrival order.  Returns `None` when `work` was cancelled.
    async fn interruptible<F: Future>(
        &self,
        work: F,
        command_rx: &mut mpsc::Receiver<AssistantCommand>,
        backlog: &mut VecDeque<AssistantCommand>,
    ) -> Option<F::Output> {
        tokio::pin!(work);
        let mut open = true;

        loop {
            tokio::select! {
                biased;
                output = &mut work => return Some(output),
                command = command_rx.recv(), if open => match command {
                    Some(AssistantCommand::Stop) => break,
                    Some(other) => backlog.push_back(other),
                    None => open = false,
                },
            }
        }

        log::info!("assistant: request cancelled by stop");
        self.stop().await;
        None
    }

    // -----------------------------------------------------------------------
    // Requests
    // -----------------------------------------------------------------------

    /// Match `text`, record the answer and read it aloud when voice is on.
    ///
    /// Always returns the match result; a speech failure only adds an error
    /// message next to the answer.
    pub async fn ask(&self, text: &str) -> MatchResult {
        let query = NormalizedQuery::new(text);
        let speech = self.update(|st| {
            st.reset_answer();
            st.phase = AssistantPhase::Processing;
            st.transcript = Some(text.to_string());
            st.spoken_words = query.tokens().to_vec();
            st.config.speech.clone()
        });

        let result = self.matcher.match_text(text);
        log::debug!("assistant: {:?} -> {:?}", text, result.topic_id());

        self.update(|st| {
            st.recognized_topic = result.topic_id().map(str::to_string);
            st.response = Some(result.message().to_string());
            st.score = result.is_match().then(|| result.score());
        });
        self.emit(AssistantEvent::Answered {
            result: result.clone(),
        })
        .await;

        if speech.enabled {
            self.set_phase(AssistantPhase::Speaking);
            if let Err(e) = self.synthesizer.speak(result.message(), &speech).await {
                log::warn!("assistant: speech output failed: {e}");
                self.update(|st| st.error_message = Some(SPEAK_ERROR_MESSAGE.to_string()));
                self.emit(AssistantEvent::Error {
                    message: SPEAK_ERROR_MESSAGE.to_string(),
                })
                .await;
            }
        }

        self.set_phase(AssistantPhase::Result);
        result
    }

    /// Capture one utterance from the listener and answer it.
    pub async fn listen(&self) -> Result<MatchResult, AssistantError> {
        let timeout_ms = self.update(|st| {
            st.reset_answer();
            st.phase = AssistantPhase::Listening;
            st.config.listen.timeout_ms
        });
        self.emit(AssistantEvent::Listening).await;

        let captured =
            tokio::time::timeout(Duration::from_millis(timeout_ms), self.listener.listen()).await;

        let text = match captured {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(self.fail_listen(e).await),
            Err(_) => return Err(self.fail_listen(SpeechError::Timeout).await),
        };

        self.emit(AssistantEvent::Transcribed { text: text.clone() })
            .await;
        Ok(self.ask(&text).await)
    }

    /// Show the instructions of topic `id` without scoring.
    pub async fn select_topic(&self, id: &str) -> Result<(), AssistantError> {
        let Some(topic) = self.matcher.knowledge_base().get(id) else {
            let err = AssistantError::UnknownTopic(id.to_string());
            self.set_error(err.to_string()).await;
            return Err(err);
        };

        self.update(|st| {
            st.reset_answer();
            st.phase = AssistantPhase::Result;
            st.transcript = Some(topic.title().to_string());
            st.recognized_topic = Some(topic.id().to_string());
            st.response = Some(topic.response().to_string());
        });
        self.emit(AssistantEvent::Selected {
            topic_id: topic.id().to_string(),
            response: topic.response().to_string(),
        })
        .await;
        Ok(())
    }

    /// Emit the catalogue's `(id, title)` pairs and return them.
    pub async fn list_topics(&self) -> Vec<(String, String)> {
        let topics: Vec<(String, String)> = self
            .matcher
            .knowledge_base()
            .topics()
            .map(|t| (t.id().to_string(), t.title().to_string()))
            .collect();
        self.emit(AssistantEvent::Topics {
            topics: topics.clone(),
        })
        .await;
        topics
    }

    /// Interrupt speech and return to idle.  The last answer stays visible.
    pub async fn stop(&self) {
        self.synthesizer.stop().await;
        self.set_phase(AssistantPhase::Idle);
        self.emit(AssistantEvent::Stopped).await;
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn update<R>(&self, f: impl FnOnce(&mut AssistantState) -> R) -> R {
        let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut st)
    }

    fn set_phase(&self, phase: AssistantPhase) {
        self.update(|st| st.phase = phase);
    }

    async fn fail_listen(&self, e: SpeechError) -> AssistantError {
        log::warn!("assistant: listening failed: {e}");
        self.set_error(LISTEN_ERROR_MESSAGE.to_string()).await;
        AssistantError::Speech(e)
    }

    async fn set_error(&self, message: String) {
        log::error!("assistant error: {message}");
        self.update(|st| {
            st.phase = AssistantPhase::Error;
            st.error_message = Some(message.clone());
        });
        self.emit(AssistantEvent::Error { message }).await;
    }

    async fn emit(&self, event: AssistantEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
