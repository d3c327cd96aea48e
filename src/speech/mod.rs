//! Speech collaborator boundary.
//!
//! Speech capture and synthesis live outside this crate.  The assistant only
//! sees two async, object-safe contracts:
//!
//! * [`SpeechListener`]: produces a transcript (text in).
//! * [`SpeechSynthesizer`]: reads a response aloud (text out).
//!
//! Bundled implementations are deliberately trivial:
//!
//! | Type                 | Behaviour                                       |
//! |----------------------|-------------------------------------------------|
//! | [`ScriptedListener`] | returns a fixed phrase (demo input)             |
//! | [`SilentSynthesizer`]| does nothing; used when voice output is off     |
//! | [`LogSynthesizer`]   | logs the utterance at `info` level              |

pub mod listener;
pub mod synthesizer;

pub use listener::{ScriptedListener, SpeechListener, DEMO_PHRASE};
pub use synthesizer::{LogSynthesizer, SilentSynthesizer, SpeechSynthesizer};

#[cfg(test)]
pub use listener::MockListener;
#[cfg(test)]
pub use synthesizer::MockSynthesizer;

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Failures reported by speech collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// No speech backend is available on this device.
    #[error("speech backend unavailable")]
    Unavailable,

    /// The listener produced nothing within the configured timeout.
    #[error("timed out waiting for speech")]
    Timeout,

    /// Capturing or transcribing speech failed.
    #[error("speech capture failed: {0}")]
    Capture(String),

    /// Reading the response aloud failed.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}
