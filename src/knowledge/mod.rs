//! First-aid knowledge base.
//!
//! This module provides:
//! * [`Topic`] — one emergency condition: id, title, keywords, response.
//! * [`KnowledgeBase`] — validated, ordered, read-only topic catalog.
//! * [`KnowledgeBaseError`] — configuration errors; fatal at startup.
//! * [`builtin`] / [`install`] / [`installed`] — the compiled-in catalog and
//!   its process-wide instance.
//!
//! # Quick start
//!
//! ```rust
//! use kiongozi_care::knowledge;
//!
//! let kb = knowledge::install().expect("built-in knowledge base is invalid");
//! assert!(kb.contains("cpr"));
//! ```

pub mod base;
pub mod builtin;
pub mod topic;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use base::{KnowledgeBase, KnowledgeBaseError};
pub use builtin::{builtin, install, installed, QUICK_SELECT};
pub use topic::Topic;
