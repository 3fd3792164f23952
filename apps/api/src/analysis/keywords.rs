//! Per-review keyword extraction.
//!
//! Default: `YakeExtractor` (unsupervised YAKE ranking, English stop words).
//! Keywords keep the casing they have in the review text.

use anyhow::{Context, Result};
use yake_rust::{get_n_best, Config, StopWords};

pub const KEYWORDS_PER_REVIEW: usize = 5;

pub trait KeywordExtractor: Send + Sync {
    /// Up to `top_k` keywords, best first.
    fn extract(&self, text: &str, top_k: usize) -> Vec<String>;
}

pub struct YakeExtractor {
    stop_words: StopWords,
    config: Config,
}

impl YakeExtractor {
    pub fn new() -> Result<Self> {
        let stop_words =
            StopWords::predefined("en").context("YAKE has no predefined English stop words")?;
        Ok(Self {
            stop_words,
            config: Config::default(),
        })
    }
}

impl KeywordExtractor for YakeExtractor {
    fn extract(&self, text: &str, top_k: usize) -> Vec<String> {
        if text.trim().is_empty() || top_k == 0 {
            return Vec::new();
        }
        get_n_best(top_k, text, &self.stop_words, &self.config)
            .into_iter()
            .map(|item| item.raw)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVIEW: &str = "The subscription renewal charged me twice. Subscription support \
        never answered and the renewal page keeps crashing when I try to cancel the subscription.";

    #[test]
    fn test_yake_returns_at_most_top_k() {
        let extractor = YakeExtractor::new().unwrap();
        let keywords = extractor.extract(REVIEW, KEYWORDS_PER_REVIEW);
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= KEYWORDS_PER_REVIEW);
    }

    #[test]
    fn test_yake_finds_repeated_topic() {
        let extractor = YakeExtractor::new().unwrap();
        let keywords = extractor.extract(REVIEW, 10);
        assert!(
            keywords.iter().any(|k| k.to_lowercase().contains("subscription")),
            "keywords were {keywords:?}"
        );
    }

    #[test]
    fn test_yake_keeps_surface_form() {
        let extractor = YakeExtractor::new().unwrap();
        let keywords = extractor.extract(
            "Nebula crashed twice today. Nebula support ignored my refund. \
             I paid for Nebula and it still crashes.",
            10,
        );
        assert!(
            keywords.iter().any(|k| k.contains("Nebula")),
            "keywords were {keywords:?}"
        );
        assert!(keywords.iter().all(|k| k != "nebula"));
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        let extractor = YakeExtractor::new().unwrap();
        assert!(extractor.extract("   ", KEYWORDS_PER_REVIEW).is_empty());
    }
}
