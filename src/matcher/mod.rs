//! Response matcher: free text in, best first-aid topic (or fallback) out.
//!
//! This module provides:
//! * [`match_query`] — the pure scoring function over a [`KnowledgeBase`].
//! * [`ResponseMatcher`] — a matcher bound to one knowledge base.
//! * [`NormalizedQuery`] — lowercased text plus whitespace tokens.
//! * [`MatchResult`] / [`FALLBACK_MESSAGE`] — the matcher's output.
//! * [`score_topic`] / [`score_all`] — per-topic scores for diagnostics.
//!
//! [`KnowledgeBase`]: crate::knowledge::KnowledgeBase
//!
//! # Quick start
//!
//! ```rust
//! use kiongozi_care::knowledge;
//! use kiongozi_care::matcher::{MatchResult, ResponseMatcher};
//!
//! let kb = knowledge::install().unwrap();
//! let matcher = ResponseMatcher::new(kb);
//!
//! match matcher.match_text("my arm is burning") {
//!     MatchResult::Matched { topic_id, response, .. } => {
//!         assert_eq!(topic_id, "burn");
//!         println!("{response}");
//!     }
//!     MatchResult::NoMatch { fallback_message } => println!("{fallback_message}"),
//! }
//! ```

pub mod engine;
pub mod query;
pub mod result;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use engine::{match_query, score_all, score_topic, ResponseMatcher, TopicScore};
pub use query::NormalizedQuery;
pub use result::{MatchResult, FALLBACK_MESSAGE};
