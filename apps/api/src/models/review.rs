use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A single App Store review as fetched from the RSS feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// 1-based position of the review within its fetched batch.
    pub recall_id: u32,
    pub rating: u8,
    pub title: String,
    pub text: String,
    pub created_at: Option<DateTime<FixedOffset>>,
}

/// Polarity bucket derived from a lexicon compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// A review plus whatever per-review enrichment the chosen analysis produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedReview {
    pub recall_id: u32,
    pub rating: u8,
    pub title: String,
    pub text: String,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub sentiment: Option<Sentiment>,
    pub keywords: Option<Vec<String>>,
}

impl AnalyzedReview {
    pub fn plain(review: &Review) -> Self {
        Self {
            recall_id: review.recall_id,
            rating: review.rating,
            title: review.title.clone(),
            text: review.text.clone(),
            created_at: review.created_at,
            sentiment: None,
            keywords: None,
        }
    }
}
