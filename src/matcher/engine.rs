//! Keyword scoring and best-topic selection.
//!
//! # Scoring
//!
//! For every keyword `k` of a topic:
//!
//! | Condition                              | Points |
//! |----------------------------------------|--------|
//! | lowercased query contains `k`          | 1.0    |
//! | `k` also equals a whitespace token     | +0.5   |
//!
//! The topic with the highest total wins.  A later topic displaces the
//! current best only with a strictly greater score, so ties go to the topic
//! declared first.  A best score of zero is `NoMatch`.
//!
//! Short keywords inside longer words still count (`"heat"` inside
//! `"heatstroke"`, `"cut"` inside `"acute"`).  No word-boundary handling is
//! attempted beyond the token bonus.

use serde::Serialize;

use crate::knowledge::{KnowledgeBase, Topic};
use crate::matcher::query::NormalizedQuery;
use crate::matcher::result::MatchResult;

/// Points for a keyword found anywhere in the query.
pub const SUBSTRING_POINTS: f64 = 1.0;
/// Extra points when the keyword is also a whole token.
pub const TOKEN_BONUS: f64 = 0.5;

// ---------------------------------------------------------------------------
// Per-topic scoring
// ---------------------------------------------------------------------------

/// Score of one topic for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicScore {
    pub topic_id: String,
    pub score: f64,
}

/// Sum the keyword points of `topic` for `query`.
pub fn score_topic(query: &NormalizedQuery, topic: &Topic) -> f64 {
    topic
        .keywords()
        .iter()
        .filter(|k| query.contains(k))
        .map(|k| {
            if query.has_token(k) {
                SUBSTRING_POINTS + TOKEN_BONUS
            } else {
                SUBSTRING_POINTS
            }
        })
        .sum()
}

/// Scores of every topic in knowledge-base order.
pub fn score_all(query: &str, kb: &KnowledgeBase) -> Vec<TopicScore> {
    let query = NormalizedQuery::new(query);
    kb.topics()
        .map(|topic| TopicScore {
            topic_id: topic.id().to_string(),
            score: score_topic(&query, topic),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// `true` when `candidate` should replace `best`.  Strictly greater only.
fn outranks(candidate: f64, best: f64) -> bool {
    candidate > best
}

/// Match free text against `kb`.
///
/// Pure: the same `(query, kb)` always yields the same result.
///
/// ```
/// use kiongozi_care::knowledge;
/// use kiongozi_care::matcher::match_query;
///
/// let kb = knowledge::builtin().unwrap();
/// let result = match_query("What do I do about a BURN", &kb);
/// assert_eq!(result.topic_id(), Some("burn"));
/// ```
pub fn match_query(query: &str, kb: &KnowledgeBase) -> MatchResult {
    let query = NormalizedQuery::new(query);
    if query.is_blank() {
        return MatchResult::no_match();
    }

    let best = kb.topics().fold(None::<(&Topic, f64)>, |best, topic| {
        let score = score_topic(&query, topic);
        match best {
            Some((_, best_score)) if !outranks(score, best_score) => best,
            _ if score > 0.0 => Some((topic, score)),
            _ => best,
        }
    });

    match best {
        Some((topic, score)) => {
            log::debug!("matched topic '{}' (score {score})", topic.id());
            MatchResult::Matched {
                topic_id: topic.id().to_string(),
                response: topic.response().to_string(),
                score,
            }
        }
        None => {
            log::debug!("no topic matched {:?}", query.text());
            MatchResult::no_match()
        }
    }
}

// ---------------------------------------------------------------------------
// ResponseMatcher
// ---------------------------------------------------------------------------

/// A matcher bound to one knowledge base, exposing the single-argument
/// `match(text)` call shape used by the assistant layer.
///
/// Holds only a shared reference, so it is `Copy` and freely shareable
/// across threads.
#[derive(Debug, Clone, Copy)]
pub struct ResponseMatcher<'kb> {
    kb: &'kb KnowledgeBase,
}

impl<'kb> ResponseMatcher<'kb> {
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self { kb }
    }

    pub fn knowledge_base(&self) -> &'kb KnowledgeBase {
        self.kb
    }

    /// See [`match_query`].
    pub fn match_text(&self, text: &str) -> MatchResult {
        match_query(text, self.kb)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
