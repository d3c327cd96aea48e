//! Speech output contract.

use async_trait::async_trait;

use crate::config::SpeechConfig;
use crate::speech::SpeechError;

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe text-to-speech sink.
///
/// `speak` resolves when the utterance has finished (or failed); `stop`
/// interrupts any utterance in progress and never fails.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError>;

    async fn stop(&self);
}

// ---------------------------------------------------------------------------
// SilentSynthesizer
// ---------------------------------------------------------------------------

/// Discards every utterance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&self, _text: &str, _config: &SpeechConfig) -> Result<(), SpeechError> {
        Ok(())
    }

    async fn stop(&self) {}
}

// ---------------------------------------------------------------------------
// LogSynthesizer
// ---------------------------------------------------------------------------

/// Writes each utterance to the log instead of an audio device.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSynthesizer;

#[async_trait]
impl SpeechSynthesizer for LogSynthesizer {
    async fn speak(&self, text: &str, config: &SpeechConfig) -> Result<(), SpeechError> {
        log::info!(
            "speak [{} rate={} pitch={}]: {text}",
            config.language,
            config.rate,
            config.pitch
        );
        Ok(())
    }

    async fn stop(&self) {
        log::info!("speech stopped");
    }
}

// ---------------------------------------------------------------------------
// MockSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// Records every utterance; optionally fails or lingers in every `speak`
/// call.
#[cfg(test)]
#[derive(Default)]
pub struct MockSynthesizer {
    spoken: std::sync::Mutex<Vec<String>>,
    stops: std::sync::atomic::AtomicUsize,
    fail: bool,
    delay: std::time::Duration,
}

#[cfg(test)]
impl MockSynthesizer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Take `delay` to finish each utterance.
    pub fn slow(delay: std::time::Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn speak(&self, text: &str, _config: &SpeechConfig) -> Result<(), SpeechError> {
        if self.fail {
            return Err(SpeechError::Synthesis("device busy".into()));
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn silent_and_log_never_fail() {
        let cfg = SpeechConfig::default();
        assert!(SilentSynthesizer.speak("hello", &cfg).await.is_ok());
        assert!(LogSynthesizer.speak("hello", &cfg).await.is_ok());
        SilentSynthesizer.stop().await;
        LogSynthesizer.stop().await;
    }

    #[tokio::test]
    async fn mock_records_utterances() {
        let synth = MockSynthesizer::default();
        let cfg = SpeechConfig::default();
        synth.speak("one", &cfg).await.unwrap();
        synth.speak("two", &cfg).await.unwrap();
        synth.stop().await;
        assert_eq!(synth.spoken(), ["one", "two"]);
        assert_eq!(synth.stop_count(), 1);
    }

    #[tokio::test]
    async fn failing_mock_reports_synthesis_error() {
        let synth = MockSynthesizer::failing();
        let err = synth.speak("x", &SpeechConfig::default()).await.unwrap_err();
        assert!(matches!(err, SpeechError::Synthesis(_)));
        assert!(synth.spoken().is_empty());
    }

    #[test]
    fn synthesizer_is_object_safe() {
        let _: Box<dyn SpeechSynthesizer> = Box::new(SilentSynthesizer);
    }
}
