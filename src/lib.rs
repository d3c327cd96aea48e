//! KiongoziCare: offline first-aid intent matching with a voice-assistant
//! orchestration layer.
//!
//! | Module        | Role                                                  |
//! |---------------|-------------------------------------------------------|
//! | [`knowledge`] | validated, process-wide first-aid topic catalogue     |
//! | [`matcher`]   | keyword scoring and best-topic selection              |
//! | [`speech`]    | async speech input/output collaborator traits         |
//! | [`assistant`] | command loop, phase machine and shared UI state       |
//! | [`config`]    | `settings.toml` persistence                           |

pub mod assistant;
pub mod config;
pub mod knowledge;
pub mod matcher;
pub mod speech;
