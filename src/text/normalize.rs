// Text normalization applied to every field before comparison.
//
// Steps, always in this order:
//   lowercase -> drop ASCII punctuation -> drop non-ASCII -> split on
//   whitespace -> drop stopwords -> join with single spaces
//
// The ASCII information separators (0x1C-0x1F) split tokens like whitespace.
//
// The output contains only lowercase ASCII tokens that are neither
// punctuation nor stopwords, so running it twice changes nothing.

use std::sync::Arc;

use super::stopwords::Stopwords;

/// Normalizes raw field text into the token string the vector space consumes.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: Arc<Stopwords>,
}

impl Normalizer {
    pub fn new(stopwords: Arc<Stopwords>) -> Self {
        Self { stopwords }
    }

    /// Normalize a possibly-missing field. Missing input yields "".
    pub fn normalize(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };

        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii() && !c.is_ascii_punctuation())
            .collect();

        cleaned
            .split(is_separator)
            .filter(|token| !token.is_empty() && !self.stopwords.contains(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(Arc::new(Stopwords::from_words(["the", "for", "in", "a"])))
    }

    #[test]
    fn test_missing_is_empty() {
        assert_eq!(normalizer().normalize(None), "");
    }

    #[test]
    fn test_lowercase_punctuation_stopwords() {
        let n = normalizer();
        assert_eq!(
            n.normalize(Some("The BEST Villas, for Sale in Dubai!")),
            "best villas sale dubai"
        );
    }

    #[test]
    fn test_punctuation_inside_words_joins_them() {
        // Punctuation is deleted, not replaced by a space
        assert_eq!(normalizer().normalize(Some("off-plan re:sale")), "offplan resale");
    }

    #[test]
    fn test_non_ascii_removed() {
        assert_eq!(
            normalizer().normalize(Some("Café — الإمارات living")),
            "caf living"
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalizer().normalize(Some("  marina \t\n view  ")), "marina view");
    }

    #[test]
    fn test_information_separators_split_tokens() {
        let n = normalizer();
        assert_eq!(n.normalize(Some("the\x1cdubai")), "dubai");
        assert_eq!(n.normalize(Some("marina\x1dview\x1e\x1fa")), "marina view");
        assert_eq!(n.normalize(Some("palm\x0bvilla")), "palm villa");
    }

    #[test]
    fn test_all_stopwords_is_empty() {
        assert_eq!(normalizer().normalize(Some("The a for IN")), "");
    }

    #[test]
    fn test_idempotent() {
        let n = normalizer();
        let once = n.normalize(Some("Top 10 Areas — in Dubai, for Families (2024)"));
        assert_eq!(n.normalize(Some(&once)), once);
    }
}
