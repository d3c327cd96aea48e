//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.
//! Missing fields in a settings file fall back to their defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Voice output settings handed to the speech synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Read responses aloud after a match.
    pub enabled: bool,
    /// Speaking rate multiplier (1.0 = platform default).
    pub rate: f32,
    /// Voice pitch multiplier (1.0 = platform default).
    pub pitch: f32,
    /// BCP-47 language tag for the synthesizer voice.
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rate: 0.9,
            pitch: 1.0,
            language: "en".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ListenConfig
// ---------------------------------------------------------------------------

/// Settings for obtaining a transcript from the speech listener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Maximum milliseconds to wait for the listener before giving up.
    pub timeout_ms: u64,
    /// Phrase the scripted listener returns.  `None` uses the built-in demo
    /// phrase.
    pub demo_phrase: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            demo_phrase: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use kiongozi_care::config::AppConfig;
///
/// // Returns Default when the file is missing.
/// let mut config = AppConfig::load().unwrap();
/// config.speech.enabled = false;
/// config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Voice output settings.
    pub speech: SpeechConfig,
    /// Speech input settings.
    pub listen: ListenConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(cfg.speech.enabled);
        assert_eq!(cfg.speech.rate, 0.9);
        assert_eq!(cfg.speech.pitch, 1.0);
        assert_eq!(cfg.speech.language, "en");
        assert_eq!(cfg.listen.timeout_ms, 10_000);
        assert!(cfg.listen.demo_phrase.is_none());
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.toml");

        let mut cfg = AppConfig::default();
        cfg.speech.enabled = false;
        cfg.speech.rate = 1.25;
        cfg.speech.language = "sw".into();
        cfg.listen.timeout_ms = 3_000;
        cfg.listen.demo_phrase = Some("my child has a fever and fits".into());

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded, cfg);
    }

    /// Partial files keep defaults for everything they omit.
    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[speech]\nenabled = false\n").unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert!(!cfg.speech.enabled);
        assert_eq!(cfg.speech.rate, 0.9);
        assert_eq!(cfg.listen, ListenConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "speech = [not toml").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
