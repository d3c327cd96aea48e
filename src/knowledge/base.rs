//! Validated, immutable topic catalog.
//!
//! [`KnowledgeBase::new`] is the only way to obtain a catalog, and it rejects
//! every table the matcher cannot score predictably.  Once built, nothing can
//! add, remove or edit a topic.

use std::collections::HashMap;

use thiserror::Error;

use crate::knowledge::topic::Topic;

// ---------------------------------------------------------------------------
// KnowledgeBaseError
// ---------------------------------------------------------------------------

/// Configuration errors detected while building a [`KnowledgeBase`].
///
/// All of these are fatal at startup: the application must not proceed with
/// a broken catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeBaseError {
    /// A topic was declared with an empty id.
    #[error("topic id must not be empty")]
    EmptyTopicId,

    /// Two topics share the same id.
    #[error("duplicate topic id: {0}")]
    DuplicateTopicId(String),

    /// A topic has no trigger keywords.
    #[error("topic '{0}' has no keywords")]
    EmptyKeywords(String),

    /// A topic has an empty (or whitespace-only) response.
    #[error("topic '{0}' has an empty response")]
    EmptyResponse(String),

    /// A keyword is empty, has surrounding whitespace, or is not lowercase.
    #[error("topic '{topic}' has malformed keyword {keyword:?} (must be lowercase and trimmed)")]
    MalformedKeyword { topic: String, keyword: String },

    /// A keyword appears twice within the same topic.
    #[error("topic '{topic}' lists keyword '{keyword}' more than once")]
    DuplicateKeyword { topic: String, keyword: String },

    /// The exact same keyword is declared by two different topics.
    #[error("keyword '{keyword}' is declared by both '{first}' and '{second}'")]
    SharedKeyword {
        keyword: String,
        first: String,
        second: String,
    },
}

// ---------------------------------------------------------------------------
// KnowledgeBase
// ---------------------------------------------------------------------------

/// Ordered, read-only mapping from topic id to [`Topic`].
///
/// Iteration order is declaration order; the matcher relies on it for its
/// tie-break rule.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    topics: Vec<Topic>,
    index: HashMap<String, usize>,
}

impl KnowledgeBase {
    /// Validate `topics` and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`KnowledgeBaseError`] found, checking topics in
    /// declaration order.
    ///
    /// ```
    /// use kiongozi_care::knowledge::{KnowledgeBase, KnowledgeBaseError, Topic};
    ///
    /// let err = KnowledgeBase::new(vec![
    ///     Topic::new("burn", "Burns", ["burn"], "Cool it."),
    ///     Topic::new("burn", "Burns again", ["fire"], "Cool it."),
    /// ])
    /// .unwrap_err();
    /// assert_eq!(err, KnowledgeBaseError::DuplicateTopicId("burn".into()));
    /// ```
    pub fn new(topics: Vec<Topic>) -> Result<Self, KnowledgeBaseError> {
        let mut index = HashMap::with_capacity(topics.len());
        // keyword -> id of the topic that declared it first
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for (pos, topic) in topics.iter().enumerate() {
            validate_topic(topic)?;

            if index.insert(topic.id().to_string(), pos).is_some() {
                return Err(KnowledgeBaseError::DuplicateTopicId(topic.id().to_string()));
            }

            for keyword in topic.keywords() {
                match owners.get(keyword.as_str()) {
                    Some(first) if *first == topic.id() => {
                        return Err(KnowledgeBaseError::DuplicateKeyword {
                            topic: topic.id().to_string(),
                            keyword: keyword.clone(),
                        });
                    }
                    Some(first) => {
                        return Err(KnowledgeBaseError::SharedKeyword {
                            keyword: keyword.clone(),
                            first: (*first).to_string(),
                            second: topic.id().to_string(),
                        });
                    }
                    None => {
                        owners.insert(keyword.as_str(), topic.id());
                    }
                }
            }
        }

        report_overlaps(&topics);

        log::debug!("knowledge base built with {} topics", topics.len());
        Ok(Self { topics, index })
    }

    /// Look up a topic by id.
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.index.get(id).map(|&pos| &self.topics[pos])
    }

    /// Returns `true` when a topic with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Topics in declaration order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> + '_ {
        self.topics.iter()
    }

    /// Number of topics.
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Returns `true` when the catalog has no topics.
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

fn validate_topic(topic: &Topic) -> Result<(), KnowledgeBaseError> {
    if topic.id().trim().is_empty() {
        return Err(KnowledgeBaseError::EmptyTopicId);
    }
    if topic.keywords().is_empty() {
        return Err(KnowledgeBaseError::EmptyKeywords(topic.id().to_string()));
    }
    if topic.response().trim().is_empty() {
        return Err(KnowledgeBaseError::EmptyResponse(topic.id().to_string()));
    }
    for keyword in topic.keywords() {
        let well_formed = !keyword.is_empty()
            && keyword.trim() == keyword
            && keyword.to_lowercase() == *keyword;
        if !well_formed {
            return Err(KnowledgeBaseError::MalformedKeyword {
                topic: topic.id().to_string(),
                keyword: keyword.clone(),
            });
        }
    }
    Ok(())
}

/// Log keywords contained in another topic's keyword.  Both topics score on
/// any query holding the longer one; this is accepted, not corrected.
fn report_overlaps(topics: &[Topic]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for a in topics {
        for b in topics.iter().filter(|b| b.id() != a.id()) {
            for short in a.keywords() {
                for long in b.keywords().iter().filter(|l| l.contains(short.as_str())) {
                    log::debug!(
                        "keyword '{short}' ({}) is contained in '{long}' ({})",
                        a.id(),
                        b.id()
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn burn() -> Topic {
        Topic::new("burn", "Burns", ["burn", "burns", "fire"], "Cool the burn.")
    }

    fn bleeding() -> Topic {
        Topic::new("bleeding", "Bleeding", ["bleeding", "blood"], "Apply pressure.")
    }

    #[test]
    fn builds_and_preserves_order() {
        let kb = KnowledgeBase::new(vec![bleeding(), burn()]).unwrap();
        let ids: Vec<&str> = kb.topics().map(Topic::id).collect();
        assert_eq!(ids, ["bleeding", "burn"]);
        assert_eq!(kb.len(), 2);
        assert!(!kb.is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let kb = KnowledgeBase::new(vec![burn(), bleeding()]).unwrap();
        assert_eq!(kb.get("bleeding").map(Topic::response), Some("Apply pressure."));
        assert!(kb.contains("burn"));
        assert!(kb.get("choking").is_none());
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let kb = KnowledgeBase::new(Vec::new()).unwrap();
        assert!(kb.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = KnowledgeBase::new(vec![burn(), bleeding(), burn()]).unwrap_err();
        assert_eq!(err, KnowledgeBaseError::DuplicateTopicId("burn".into()));
    }

    #[test]
    fn rejects_empty_keyword_list() {
        let empty: [&str; 0] = [];
        let err = KnowledgeBase::new(vec![Topic::new("x", "X", empty, "text")]).unwrap_err();
        assert_eq!(err, KnowledgeBaseError::EmptyKeywords("x".into()));
    }

    #[test]
    fn rejects_empty_id() {
        let err = KnowledgeBase::new(vec![Topic::new(" ", "X", ["a"], "text")]).unwrap_err();
        assert_eq!(err, KnowledgeBaseError::EmptyTopicId);
    }

    #[test]
    fn rejects_blank_response() {
        let err = KnowledgeBase::new(vec![Topic::new("x", "X", ["a"], "  \n")]).unwrap_err();
        assert_eq!(err, KnowledgeBaseError::EmptyResponse("x".into()));
    }

    #[test]
    fn rejects_uppercase_keyword() {
        let err = KnowledgeBase::new(vec![Topic::new("cpr", "CPR", ["CPR"], "Push.")]).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::MalformedKeyword { ref keyword, .. } if keyword == "CPR"));
    }

    #[test]
    fn rejects_untrimmed_keyword() {
        let err = KnowledgeBase::new(vec![Topic::new("cpr", "CPR", [" cpr"], "Push.")]).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::MalformedKeyword { .. }));
    }

    #[test]
    fn rejects_empty_keyword() {
        let err = KnowledgeBase::new(vec![Topic::new("cpr", "CPR", [""], "Push.")]).unwrap_err();
        assert!(matches!(err, KnowledgeBaseError::MalformedKeyword { .. }));
    }

    #[test]
    fn rejects_repeated_keyword_within_topic() {
        let err =
            KnowledgeBase::new(vec![Topic::new("burn", "Burns", ["burn", "fire", "burn"], "Cool.")])
                .unwrap_err();
        assert_eq!(
            err,
            KnowledgeBaseError::DuplicateKeyword {
                topic: "burn".into(),
                keyword: "burn".into(),
            }
        );
    }

    #[test]
    fn rejects_keyword_shared_across_topics() {
        let err = KnowledgeBase::new(vec![
            burn(),
            Topic::new("heatstroke", "Heat", ["heat", "fire"], "Cool down."),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            KnowledgeBaseError::SharedKeyword {
                keyword: "fire".into(),
                first: "burn".into(),
                second: "heatstroke".into(),
            }
        );
    }

    #[test]
    fn allows_substring_overlap_across_topics() {
        // "heat" is contained in "heatstroke"-style keywords of other topics;
        // that is a precision limitation, not a configuration error.
        let kb = KnowledgeBase::new(vec![
            Topic::new("a", "A", ["heat"], "one"),
            Topic::new("b", "B", ["heatwave"], "two"),
        ]);
        assert!(kb.is_ok());
    }

    #[test]
    fn multi_word_keywords_are_valid() {
        let kb = KnowledgeBase::new(vec![Topic::new(
            "choking",
            "Choking",
            ["choking", "can't breathe"],
            "Back blows.",
        )]);
        assert!(kb.is_ok());
    }

    #[test]
    fn knowledge_base_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KnowledgeBase>();
        assert_send_sync::<&'static KnowledgeBase>();
        assert_send_sync::<Topic>();
    }
}
