//! Query normalisation.

// ---------------------------------------------------------------------------
// NormalizedQuery
// ---------------------------------------------------------------------------

/// A query lowercased once and split into whitespace-delimited tokens.
///
/// Punctuation is left in place: `"burn!"` is a single token that does not
/// equal the keyword `"burn"`, although it still contains it.
///
/// ```
/// use kiongozi_care::matcher::NormalizedQuery;
///
/// let q = NormalizedQuery::new("  My ARM is burning! ");
/// assert_eq!(q.text(), "  my arm is burning! ");
/// assert_eq!(q.tokens(), ["my", "arm", "is", "burning!"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    text: String,
    tokens: Vec<String>,
}

impl NormalizedQuery {
    pub fn new(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self { text, tokens }
    }

    /// The full lowercased query, used for substring matching.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace tokens of the lowercased query, in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `true` when the query has no non-whitespace characters.
    pub fn is_blank(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.text.contains(keyword)
    }

    pub fn has_token(&self, keyword: &str) -> bool {
        self.tokens.iter().any(|t| t == keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_blank() {
        assert!(NormalizedQuery::new("").is_blank());
        assert!(NormalizedQuery::new("   \t\n").is_blank());
        assert!(!NormalizedQuery::new(" a ").is_blank());
    }

    #[test]
    fn splits_on_any_whitespace() {
        let q = NormalizedQuery::new("broken\tbone\nhelp");
        assert_eq!(q.tokens(), ["broken", "bone", "help"]);
    }

    #[test]
    fn token_equality_is_exact() {
        let q = NormalizedQuery::new("burn, please");
        assert!(q.contains("burn"));
        assert!(!q.has_token("burn"));
        assert!(q.has_token("burn,"));
    }

    #[test]
    fn lowercases_unicode() {
        let q = NormalizedQuery::new("ÉPILEPSIE");
        assert_eq!(q.text(), "épilepsie");
    }
}
