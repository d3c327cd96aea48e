//! Configuration module for KiongoziCare.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for speech output
//! and input, `AppPaths` for the cross-platform config directory, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ListenConfig, SpeechConfig};
