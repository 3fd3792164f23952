//! Sentiment scoring behind a swappable trait.
//!
//! Default: `VaderScorer`, backed by the VADER lexicon.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::models::review::Sentiment;

/// Compound scores at or beyond ±0.3 count as polar.
pub const POLARITY_THRESHOLD: f64 = 0.3;

pub trait SentimentScorer: Send + Sync {
    /// Normalised compound polarity in [-1.0, 1.0].
    fn compound(&self, text: &str) -> f64;

    fn classify(&self, text: &str) -> Sentiment {
        bucket(self.compound(text))
    }
}

pub fn bucket(compound: f64) -> Sentiment {
    if compound >= POLARITY_THRESHOLD {
        Sentiment::Positive
    } else if compound <= -POLARITY_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub struct VaderScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl VaderScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for VaderScorer {
    fn compound(&self, text: &str) -> f64 {
        self.analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_thresholds_are_inclusive() {
        assert_eq!(bucket(0.3), Sentiment::Positive);
        assert_eq!(bucket(-0.3), Sentiment::Negative);
        assert_eq!(bucket(0.29), Sentiment::Neutral);
        assert_eq!(bucket(-0.29), Sentiment::Neutral);
    }

    #[test]
    fn test_vader_positive_review() {
        let scorer = VaderScorer::new();
        assert_eq!(
            scorer.classify("I love this app, the readings are great and accurate!"),
            Sentiment::Positive
        );
    }

    #[test]
    fn test_vader_negative_review() {
        let scorer = VaderScorer::new();
        assert_eq!(
            scorer.classify("Terrible app. Awful support, I hate the constant crashes."),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_vader_plain_statement_is_neutral() {
        let scorer = VaderScorer::new();
        assert_eq!(scorer.classify("The app opens on the home screen."), Sentiment::Neutral);
    }
}
