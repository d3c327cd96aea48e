//! Assistant phase machine and shared presentation state.
//!
//! [`AssistantPhase`] drives the orchestrator's state machine.  The UI reads
//! it via [`SharedState`] to decide what to render.
//!
//! [`AssistantState`] holds everything the presentation layer shows: the
//! transcript, the words it was split into, the recognized topic, the
//! response text and any error.  None of it feeds back into matching; every
//! query is scored on its own.

use std::sync::{Arc, Mutex};

use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// AssistantPhase
// ---------------------------------------------------------------------------

/// States of the voice assistant.
///
/// ```text
/// Idle ──Listen──▶ Listening ──transcript──▶ Processing
/// Idle ──Ask─────────────────────────────────▶ Processing
///                  Processing ──voice on──▶ Speaking ──done──▶ Result
///                  Processing ──voice off───────────────────▶ Result
/// any ──error──▶ Error
/// any ──Stop───▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantPhase {
    /// Waiting for the user.
    #[default]
    Idle,
    /// The speech listener is capturing an utterance.
    Listening,
    /// A transcript is being matched against the knowledge base.
    Processing,
    /// The response is being read aloud.
    Speaking,
    /// Instructions (or fallback guidance) are on screen.
    Result,
    /// Listening or speaking failed; `error_message` says why.
    Error,
}

impl AssistantPhase {
    /// Returns `true` while the assistant is actively working.
    ///
    /// ```
    /// use kiongozi_care::assistant::AssistantPhase;
    ///
    /// assert!(!AssistantPhase::Idle.is_busy());
    /// assert!(AssistantPhase::Listening.is_busy());
    /// assert!(AssistantPhase::Speaking.is_busy());
    /// assert!(!AssistantPhase::Result.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            AssistantPhase::Listening | AssistantPhase::Processing | AssistantPhase::Speaking
        )
    }

    /// Short label for the microphone button.
    pub fn label(&self) -> &'static str {
        match self {
            AssistantPhase::Idle => "Ask for First Aid Help",
            AssistantPhase::Listening => "Listening...",
            AssistantPhase::Processing => "Processing...",
            AssistantPhase::Speaking => "Stop Assistant",
            AssistantPhase::Result => "Ask for First Aid Help",
            AssistantPhase::Error => "Try Again",
        }
    }
}

// ---------------------------------------------------------------------------
// AssistantState
// ---------------------------------------------------------------------------

/// Shared presentation state.
///
/// Held behind [`SharedState`].  The orchestrator mutates it; the UI reads
/// it.
#[derive(Debug, Clone)]
pub struct AssistantState {
    pub phase: AssistantPhase,

    /// Text the last answer was produced for.
    pub transcript: Option<String>,

    /// `transcript` lowercased and split on whitespace.
    pub spoken_words: Vec<String>,

    /// Topic id of the last answer; `None` for fallback guidance.
    pub recognized_topic: Option<String>,

    /// Instructions or fallback guidance currently on screen.
    pub response: Option<String>,

    /// Matcher score of the last answer; `None` for quick selections.
    pub score: Option<f64>,

    /// Set when `phase == AssistantPhase::Error`, or when speaking failed
    /// after a successful match.
    pub error_message: Option<String>,

    pub config: AppConfig,
}

impl AssistantState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            phase: AssistantPhase::Idle,
            transcript: None,
            spoken_words: Vec::new(),
            recognized_topic: None,
            response: None,
            score: None,
            error_message: None,
            config,
        }
    }

    /// Clear the previous answer before a new request.
    pub fn reset_answer(&mut self) {
        self.transcript = None;
        self.spoken_words.clear();
        self.recognized_topic = None;
        self.response = None;
        self.score = None;
        self.error_message = None;
    }
}

impl Default for AssistantState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`AssistantState`].
///
/// Lock for short critical sections only; never hold the guard across an
/// `.await`.
pub type SharedState = Arc<Mutex<AssistantState>>;

pub fn new_shared_state(config: AppConfig) -> SharedState {
    Arc::new(Mutex::new(AssistantState::new(config)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
