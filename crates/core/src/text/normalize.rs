//! Text normalization for BM25 tokens and search queries.
//!
//! Pipeline: lowercase, replace every character outside `a-z` with a space,
//! split on whitespace, drop English stop words, lemmatize. Lemmatization is
//! pluggable through [`Lemmatizer`]; when it fails the unlemmatized tokens
//! are returned, so callers always receive a token sequence.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
        "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
        "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
        "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by",
        "for", "with", "about", "against", "between", "into", "through", "during", "before",
        "after", "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over",
        "under", "again", "further", "then", "once", "here", "there", "when", "where", "why",
        "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
        "will", "just", "don", "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
        "aren", "couldn", "didn", "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn",
        "mustn", "needn", "shan", "shouldn", "wasn", "weren", "won", "wouldn",
    ]
    .into_iter()
    .collect()
});

/// Nouns whose singular ends in `-ie`, so `-ies` must not become `-y`.
static IE_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "auntie", "birdie", "brownie", "calorie", "cookie", "goalie", "hoagie", "movie",
        "pie", "pierogie", "prairie", "rookie", "smoothie", "sweetie", "veggie", "zombie",
    ]
    .into_iter()
    .collect()
});

/// Plurals no suffix rule recovers.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("chilies", "chili"),
    ("chillies", "chilli"),
    ("knives", "knife"),
    ("halves", "half"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
];

/// Lemmatization failed; the normalizer falls back to raw tokens.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("lemmatizer unavailable: {0}")]
pub struct LemmaError(pub String);

/// Maps an inflected token to its base form.
pub trait Lemmatizer: Send + Sync {
    /// Returns the lemma of `token`. `token` is lowercase ASCII.
    fn lemmatize(&self, token: &str) -> Result<String, LemmaError>;
}

/// Rule-based plural-noun lemmatizer.
///
/// Covers the inflections that dominate ingredient lists (`tomatoes`,
/// `berries`, `peaches`, `eggs`) without a dictionary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuffixLemmatizer;

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize(&self, token: &str) -> Result<String, LemmaError> {
        if token.len() <= 3 || ["ss", "us", "is"].iter().any(|s| token.ends_with(s)) {
            return Ok(token.to_string());
        }
        if let Some(&(_, lemma)) = IRREGULAR_PLURALS.iter().find(|(p, _)| *p == token) {
            return Ok(lemma.to_string());
        }
        if let Some(stem) = token.strip_suffix('s').filter(|s| IE_NOUNS.contains(s)) {
            return Ok(stem.to_string());
        }
        if token.len() > 4 && token.ends_with("ies") {
            return Ok(format!("{}y", &token[..token.len() - 3]));
        }
        if ["oes", "ches", "shes", "xes", "sses", "zes"]
            .iter()
            .any(|s| token.ends_with(s))
        {
            return Ok(token[..token.len() - 2].to_string());
        }
        if let Some(stem) = token.strip_suffix('s') {
            return Ok(stem.to_string());
        }
        Ok(token.to_string())
    }
}

/// Produces normalized token sequences from raw text.
pub struct TextNormalizer {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Box::new(SuffixLemmatizer))
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer").finish_non_exhaustive()
    }
}

impl TextNormalizer {
    /// Creates a normalizer with a custom lemmatizer.
    pub fn new(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        Self { lemmatizer }
    }

    /// Lowercase, keep only `a-z`, collapse whitespace.
    pub fn clean(text: &str) -> String {
        let replaced: String = text
            .chars()
            .map(|c| {
                let c = c.to_ascii_lowercase();
                if c.is_ascii_lowercase() {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        replaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Full pipeline: clean, split, remove stop words, lemmatize.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = Self::clean(text);
        let tokens: Vec<&str> = cleaned
            .split(' ')
            .filter(|t| !t.is_empty() && !STOP_WORDS.contains(t))
            .collect();

        let lemmas: Result<Vec<String>, LemmaError> = tokens
            .iter()
            .map(|t| self.lemmatizer.lemmatize(t))
            .collect();
        match lemmas {
            Ok(lemmas) => lemmas,
            Err(e) => {
                tracing::warn!("{e}; using unlemmatized tokens");
                tokens.into_iter().map(str::to_string).collect()
            }
        }
    }

    /// Normalizes a list of fields as one text (ingredients, steps).
    pub fn normalize_all(&self, items: &[String]) -> Vec<String> {
        self.normalize(&items.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenLemmatizer;

    impl Lemmatizer for BrokenLemmatizer {
        fn lemmatize(&self, _token: &str) -> Result<String, LemmaError> {
            Err(LemmaError("no wordnet data".into()))
        }
    }

    #[test]
    fn test_clean_strips_digits_and_punctuation() {
        assert_eq!(
            TextNormalizer::clean("  2 Cups of Rice, (cooked)! "),
            "cups of rice cooked"
        );
        assert_eq!(TextNormalizer::clean("Crème brûlée"), "cr me br l e");
    }

    #[test]
    fn test_normalize_removes_stop_words_and_lemmatizes() {
        let n = TextNormalizer::default();
        assert_eq!(
            n.normalize("The best tomatoes and berries for the salads"),
            vec!["best", "tomato", "berry", "salad"]
        );
    }

    #[test]
    fn test_normalize_empty_query() {
        let n = TextNormalizer::default();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("the and of 123").is_empty());
    }

    #[test]
    fn test_lemmatizer_failure_falls_back_to_tokens() {
        let n = TextNormalizer::new(Box::new(BrokenLemmatizer));
        assert_eq!(n.normalize("fresh eggs"), vec!["fresh", "eggs"]);
    }

    #[test]
    fn test_suffix_rules() {
        let l = SuffixLemmatizer;
        let lemma = |t: &str| l.lemmatize(t).unwrap();
        assert_eq!(lemma("eggs"), "egg");
        assert_eq!(lemma("potatoes"), "potato");
        assert_eq!(lemma("cherries"), "cherry");
        assert_eq!(lemma("peaches"), "peach");
        assert_eq!(lemma("dishes"), "dish");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("pies"), "pie");
        assert_eq!(lemma("cookies"), "cookie");
        assert_eq!(lemma("brownies"), "brownie");
        assert_eq!(lemma("smoothies"), "smoothie");
        assert_eq!(lemma("veggies"), "veggie");
        assert_eq!(lemma("calories"), "calorie");
        assert_eq!(lemma("hoagies"), "hoagie");
        assert_eq!(lemma("chilies"), "chili");
        assert_eq!(lemma("cookie"), "cookie");
        assert_eq!(lemma("berries"), "berry");
        assert_eq!(lemma("leaves"), "leaf");
        assert_eq!(lemma("glass"), "glass");
        assert_eq!(lemma("hummus"), "hummus");
        assert_eq!(lemma("rice"), "rice");
        assert_eq!(lemma("gas"), "gas");
    }

    #[test]
    fn test_normalize_all_joins_fields() {
        let n = TextNormalizer::default();
        let items = vec!["2 onions".to_string(), "olive oil".to_string()];
        assert_eq!(n.normalize_all(&items), vec!["onion", "olive", "oil"]);
    }
}
