use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::keywords::{KeywordExtractor, KEYWORDS_PER_REVIEW};
use crate::analysis::metrics::compute_metrics;
use crate::analysis::ngrams::{extract_negative_keywords, TermCount, DEFAULT_TOP_K};
use crate::analysis::sentiment::SentimentScorer;
use crate::models::review::{AnalyzedReview, Review, Sentiment};

/// Depth of analysis requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    /// Rating metrics and negative keywords only.
    #[default]
    Basic,
    /// Additionally VADER sentiment and per-review keywords.
    Vader,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoreAnalysis {
    pub average_rating: f64,
    pub rating_distribution: std::collections::BTreeMap<u8, usize>,
    pub negative_keywords: Vec<TermCount>,
    pub sentiment_distribution: Option<SentimentDistribution>,
    pub reviews: Vec<AnalyzedReview>,
}

/// One shared sentiment scorer and keyword extractor per process.
#[derive(Clone)]
pub struct ReviewAnalyzer {
    sentiment: Arc<dyn SentimentScorer>,
    keywords: Arc<dyn KeywordExtractor>,
}

impl ReviewAnalyzer {
    pub fn new(sentiment: Arc<dyn SentimentScorer>, keywords: Arc<dyn KeywordExtractor>) -> Self {
        Self {
            sentiment,
            keywords,
        }
    }

    /// Scores and tags every review. The input batch is left untouched.
    pub fn run(&self, reviews: &[Review]) -> (Vec<AnalyzedReview>, SentimentDistribution) {
        let mut distribution = SentimentDistribution::default();

        let analyzed = reviews
            .iter()
            .map(|review| {
                let sentiment = self.sentiment.classify(&review.text);
                match sentiment {
                    Sentiment::Positive => distribution.positive += 1,
                    Sentiment::Neutral => distribution.neutral += 1,
                    Sentiment::Negative => distribution.negative += 1,
                }

                AnalyzedReview {
                    sentiment: Some(sentiment),
                    keywords: Some(self.keywords.extract(&review.text, KEYWORDS_PER_REVIEW)),
                    ..AnalyzedReview::plain(review)
                }
            })
            .collect();

        (analyzed, distribution)
    }

    /// Rating metrics and negative keywords, plus sentiment when `kind` is `Vader`.
    pub fn analyze(&self, reviews: &[Review], kind: AnalysisKind) -> CoreAnalysis {
        let metrics = compute_metrics(reviews);
        let negative_keywords = extract_negative_keywords(reviews, DEFAULT_TOP_K);

        let (reviews, sentiment_distribution) = match kind {
            AnalysisKind::Basic => (reviews.iter().map(AnalyzedReview::plain).collect(), None),
            AnalysisKind::Vader => {
                let (analyzed, distribution) = self.run(reviews);
                (analyzed, Some(distribution))
            }
        };

        CoreAnalysis {
            average_rating: metrics.average_rating,
            rating_distribution: metrics.rating_distribution,
            negative_keywords,
            sentiment_distribution,
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Positive if the text says "good", negative if it says "bad".
    struct WordScorer;

    impl SentimentScorer for WordScorer {
        fn compound(&self, text: &str) -> f64 {
            if text.contains("good") {
                0.8
            } else if text.contains("bad") {
                -0.8
            } else {
                0.0
            }
        }
    }

    struct FirstWords;

    impl KeywordExtractor for FirstWords {
        fn extract(&self, text: &str, top_k: usize) -> Vec<String> {
            text.split_whitespace().take(top_k).map(str::to_string).collect()
        }
    }

    fn analyzer() -> ReviewAnalyzer {
        ReviewAnalyzer::new(Arc::new(WordScorer), Arc::new(FirstWords))
    }

    fn review(id: u32, rating: u8, text: &str) -> Review {
        Review {
            recall_id: id,
            rating,
            title: format!("title {id}"),
            text: text.to_string(),
            created_at: None,
        }
    }

    fn batch() -> Vec<Review> {
        vec![
            review(1, 5, "good app"),
            review(2, 1, "bad login crash"),
            review(3, 1, "bad login crash"),
            review(4, 2, "bad login crash again"),
            review(5, 3, "it is fine"),
        ]
    }

    #[test]
    fn test_basic_has_no_sentiment() {
        let result = analyzer().analyze(&batch(), AnalysisKind::Basic);
        assert!(result.sentiment_distribution.is_none());
        assert!(result.reviews.iter().all(|r| r.sentiment.is_none() && r.keywords.is_none()));
        assert!((result.average_rating - 2.4).abs() < 1e-9);
        assert_eq!(result.rating_distribution[&1], 2);
    }

    #[test]
    fn test_vader_counts_sentiment_buckets() {
        let result = analyzer().analyze(&batch(), AnalysisKind::Vader);
        assert_eq!(
            result.sentiment_distribution,
            Some(SentimentDistribution {
                positive: 1,
                neutral: 1,
                negative: 3
            })
        );
        assert_eq!(result.reviews[0].sentiment, Some(Sentiment::Positive));
        assert_eq!(
            result.reviews[3].keywords.as_deref(),
            Some(&["bad".to_string(), "login".to_string(), "crash".to_string(), "again".to_string()][..])
        );
    }

    #[test]
    fn test_negative_keywords_included_for_both_kinds() {
        for kind in [AnalysisKind::Basic, AnalysisKind::Vader] {
            let result = analyzer().analyze(&batch(), kind);
            assert_eq!(
                result.negative_keywords,
                vec![
                    ("bad".to_string(), 3),
                    ("login".to_string(), 3),
                    ("crash".to_string(), 3)
                ]
            );
        }
    }

    #[test]
    fn test_analysis_kind_parses_lowercase() {
        let kind: AnalysisKind = serde_json::from_str("\"vader\"").unwrap();
        assert_eq!(kind, AnalysisKind::Vader);
        assert_eq!(AnalysisKind::default(), AnalysisKind::Basic);
    }
}
