//! Text normalisation shared by the keyword and n-gram extractors.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").expect("valid regex"));
static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"));

/// Stop words for single-keyword counting. Includes the product names that
/// dominate complaint text without saying anything about the complaint.
pub const KEYWORD_STOP_WORDS: &[&str] = &[
    "i", "and", "to", "the", "it", "my", "for", "a", "in", "of", "t", "is", "was", "me", "on",
    "that", "this", "so", "but", "with", "at", "have", "had", "you", "your", "they", "are", "be",
    "as", "if", "just", "not", "from", "im", "do", "all", "or", "no", "m", "s", "very", "really",
    "instagram", "insta", "ig", "app", "dont", "cant", "doesnt",
];

pub const BIGRAM_STOP_WORDS: &[&str] = &[
    "the", "and", "you", "for", "but", "with", "this", "that", "are", "was", "very", "just",
    "not", "have", "has", "can", "get", "all", "its", "too",
];

pub const TRIGRAM_STOP_WORDS: &[&str] =
    &["the", "and", "you", "for", "but", "with", "this", "that", "are"];

pub const NGRAM_2_3_STOP_WORDS: &[&str] =
    &["the", "and", "you", "for", "but", "with", "this", "that"];

/// Lowercases, drops URLs and punctuation, and collapses whitespace.
pub fn clean_text(text: &str) -> String {
    let lower = text.to_lowercase();
    let without_urls = URL_RE.replace_all(&lower, " ");
    let alnum = NON_ALNUM_RE.replace_all(&without_urls, " ");
    alnum.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercases, drops punctuation, and keeps tokens longer than two
/// characters that are not in `stop`.
pub fn clean_tokens(text: &str, stop: &[&str]) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_ALNUM_RE
        .replace_all(&lower, " ")
        .split_whitespace()
        .filter(|t| t.chars().count() > 2 && !stop.contains(t))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_urls_and_punctuation() {
        assert_eq!(
            clean_text("Check https://example.com/help?x=1 NOW!!! It's   broken."),
            "check now it s broken"
        );
    }

    #[test]
    fn test_clean_text_drops_non_ascii_letters() {
        assert_eq!(clean_text("Café crashed 💥 twice"), "caf crashed twice");
    }

    #[test]
    fn test_clean_tokens_filters_short_and_stop_words() {
        let tokens = clean_tokens("The app is SO slow, and it crashes!", BIGRAM_STOP_WORDS);
        assert_eq!(tokens, vec!["app", "slow", "crashes"]);
    }

    #[test]
    fn test_clean_tokens_keeps_urls_as_tokens() {
        let tokens = clean_tokens("see http://x.io", &[]);
        assert_eq!(tokens, vec!["see", "http"]);
    }
}
