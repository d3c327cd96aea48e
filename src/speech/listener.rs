//! Speech input contract and the scripted demo listener.

use async_trait::async_trait;

use crate::speech::SpeechError;

/// Phrase returned by [`ScriptedListener`] when no demo input was supplied.
pub const DEMO_PHRASE: &str = "what should I do for a bleeding wound";

// ---------------------------------------------------------------------------
// SpeechListener trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe source of transcribed speech.
///
/// Implementations wrap whatever platform recognizer is available and return
/// the final transcript.  Timeouts are applied by the caller.
#[async_trait]
pub trait SpeechListener: Send + Sync {
    /// Capture one utterance and return its transcript.
    async fn listen(&self) -> Result<String, SpeechError>;
}

// ---------------------------------------------------------------------------
// ScriptedListener
// ---------------------------------------------------------------------------

/// Returns a fixed phrase instead of capturing audio.
///
/// Used where no recognizer exists (desktop builds, demos).  With no phrase
/// configured it falls back to [`DEMO_PHRASE`].
///
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use kiongozi_care::speech::{ScriptedListener, SpeechListener, DEMO_PHRASE};
///
/// let listener = ScriptedListener::new(None);
/// assert_eq!(listener.listen().await.unwrap(), DEMO_PHRASE);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedListener {
    phrase: Option<String>,
}

impl ScriptedListener {
    pub fn new(phrase: Option<String>) -> Self {
        Self { phrase }
    }

    /// The phrase [`listen`](SpeechListener::listen) will return.
    pub fn phrase(&self) -> &str {
        match self.phrase.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEMO_PHRASE,
        }
    }
}

#[async_trait]
impl SpeechListener for ScriptedListener {
    async fn listen(&self) -> Result<String, SpeechError> {
        Ok(self.phrase().to_string())
    }
}

// ---------------------------------------------------------------------------
// MockListener  (test-only)
// ---------------------------------------------------------------------------

/// Test double returning a pre-configured result, optionally after a delay.
#[cfg(test)]
pub struct MockListener {
    response: Result<String, SpeechError>,
    delay: std::time::Duration,
}

#[cfg(test)]
impl MockListener {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            delay: std::time::Duration::ZERO,
        }
    }

    pub fn err(error: SpeechError) -> Self {
        Self {
            response: Err(error),
            delay: std::time::Duration::ZERO,
        }
    }

    /// Delay every `listen` call by `delay`.
    pub fn delayed(mut self, delay: std::time::Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechListener for MockListener {
    async fn listen(&self) -> Result<String, SpeechError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
