//! Matcher output.

use serde::Serialize;

/// Guidance returned when no topic scores above zero.
pub const FALLBACK_MESSAGE: &str = "I'm sorry, I couldn't understand your question. \
Please try asking about specific first aid situations like burns, bleeding, CPR, or choking.";

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

/// Outcome of matching one query against the knowledge base.
///
/// `NoMatch` is an ordinary result, not an error: the caller shows the
/// fallback guidance instead of instructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchResult {
    /// The best-scoring topic, with a score strictly above zero.
    Matched {
        topic_id: String,
        response: String,
        score: f64,
    },
    /// No topic scored above zero (or the query was blank).
    NoMatch { fallback_message: String },
}

impl MatchResult {
    pub(crate) fn no_match() -> Self {
        MatchResult::NoMatch {
            fallback_message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// Id of the matched topic, if any.
    pub fn topic_id(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { topic_id, .. } => Some(topic_id),
            MatchResult::NoMatch { .. } => None,
        }
    }

    /// Instructions of the matched topic, if any.
    pub fn response(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { response, .. } => Some(response),
            MatchResult::NoMatch { .. } => None,
        }
    }

    /// Text to show (and speak): the instructions, or the fallback guidance.
    pub fn message(&self) -> &str {
        match self {
            MatchResult::Matched { response, .. } => response,
            MatchResult::NoMatch { fallback_message } => fallback_message,
        }
    }

    /// Winning score; `0.0` for `NoMatch`.
    pub fn score(&self) -> f64 {
        match self {
            MatchResult::Matched { score, .. } => *score,
            MatchResult::NoMatch { .. } => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_carries_fallback() {
        let r = MatchResult::no_match();
        assert!(!r.is_match());
        assert_eq!(r.message(), FALLBACK_MESSAGE);
        assert_eq!(r.topic_id(), None);
        assert_eq!(r.response(), None);
        assert_eq!(r.score(), 0.0);
    }

    #[test]
    fn matched_accessors() {
        let r = MatchResult::Matched {
            topic_id: "cpr".into(),
            response: "Push hard.".into(),
            score: 1.5,
        };
        assert!(r.is_match());
        assert_eq!(r.topic_id(), Some("cpr"));
        assert_eq!(r.message(), "Push hard.");
        assert_eq!(r.score(), 1.5);
    }

    #[test]
    fn fallback_text_is_exact() {
        assert_eq!(
            FALLBACK_MESSAGE,
            "I'm sorry, I couldn't understand your question. Please try asking about specific \
             first aid situations like burns, bleeding, CPR, or choking."
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(MatchResult::Matched {
            topic_id: "burn".into(),
            response: "Cool it.".into(),
            score: 1.5,
        })
        .unwrap();
        assert_eq!(json["kind"], "matched");
        assert_eq!(json["topic_id"], "burn");
        assert_eq!(json["score"], 1.5);

        let json = serde_json::to_value(MatchResult::no_match()).unwrap();
        assert_eq!(json["kind"], "no_match");
        assert_eq!(json["fallback_message"], FALLBACK_MESSAGE);
    }
}
