//! A single emergency condition entry.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Topic
// ---------------------------------------------------------------------------

/// One first-aid topic: its trigger keywords and the canonical instructions
/// returned when a query resolves to it.
///
/// Fields are private so a `Topic` can only be observed through a validated
/// [`KnowledgeBase`](crate::knowledge::KnowledgeBase); construction itself is
/// unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    id: String,
    title: String,
    keywords: Vec<String>,
    response: String,
}

impl Topic {
    /// Build a topic.  Validation happens in
    /// [`KnowledgeBase::new`](crate::knowledge::KnowledgeBase::new).
    ///
    /// ```
    /// use kiongozi_care::knowledge::Topic;
    ///
    /// let t = Topic::new("burn", "Burns & Scalds", ["burn", "fire"], "Cool the burn.");
    /// assert_eq!(t.id(), "burn");
    /// assert_eq!(t.keywords().len(), 2);
    /// ```
    pub fn new<K, S>(
        id: impl Into<String>,
        title: impl Into<String>,
        keywords: K,
        response: impl Into<String>,
    ) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
            response: response.into(),
        }
    }

    /// Unique short identifier (e.g. `"burn"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Label shown on quick-select category cards.  Never used in scoring.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trigger keywords in declaration order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Canonical instructional text.
    pub fn response(&self) -> &str {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_keep_declaration_order() {
        let t = Topic::new("cpr", "CPR", ["cpr", "unconscious", "heart"], "Push hard.");
        assert_eq!(t.keywords(), ["cpr", "unconscious", "heart"]);
    }

    #[test]
    fn accepts_owned_keywords() {
        let kws = vec![String::from("seizure"), String::from("fits")];
        let t = Topic::new("seizure", "Seizure", kws, "Stay with them.");
        assert_eq!(t.keywords().len(), 2);
        assert_eq!(t.title(), "Seizure");
        assert_eq!(t.response(), "Stay with them.");
    }
}
