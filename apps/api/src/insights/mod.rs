//! Insight generation. Turns complaint text into a short list of problems
//! and suggested fixes via the LLM.
//!
//! `AppState` holds an `Arc<dyn InsightGenerator>`. Generation never fails a
//! request: a missing key or an LLM error comes back as a single placeholder
//! insight describing what went wrong.

pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::insights::prompts::{insights_system_prompt, product_analysis_format};
use crate::llm_client::LlmClient;
use crate::models::review::Review;

/// How many reviews are quoted in a single prompt.
pub const PROMPT_REVIEW_LIMIT: usize = 30;
/// Ratings at or below this are treated as complaints.
const PROBLEM_RATING_MAX: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub problem_description: String,
    pub improvement_option: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalysis {
    pub top_issues: Vec<Insight>,
}

impl ProductAnalysis {
    fn placeholder(problem: &str, improvement: impl Into<String>) -> Self {
        Self {
            top_issues: vec![Insight {
                problem_description: problem.to_string(),
                improvement_option: improvement.into(),
            }],
        }
    }
}

#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, reviews: &[Review]) -> ProductAnalysis;
}

/// Formats up to `limit` reviews as a numbered prompt block.
///
/// Complaints (rating ≤ 3) are preferred; when there are none, any reviews
/// are used. Returns an empty string when there is nothing to quote.
pub fn format_reviews(reviews: &[Review], limit: usize) -> String {
    let problematic: Vec<&Review> = reviews
        .iter()
        .filter(|r| r.rating <= PROBLEM_RATING_MAX)
        .collect();

    let selection: Vec<&Review> = if problematic.is_empty() {
        reviews.iter().take(limit).collect()
    } else {
        problematic.into_iter().take(limit).collect()
    };

    if selection.is_empty() {
        return String::new();
    }

    let mut block = String::from("Reviews:\n");
    for (i, review) in selection.iter().enumerate() {
        let body = review.text.replace('\n', " ");
        block.push_str(&format!("{}. {}. {}\n", i + 1, review.title, body.trim()));
    }
    block
}

pub struct LlmInsightGenerator {
    llm: LlmClient,
}

impl LlmInsightGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate(&self, reviews: &[Review]) -> ProductAnalysis {
        if !self.llm.is_configured() {
            return ProductAnalysis::placeholder(
                "API Key missing",
                "Add OPENAI_API_KEY to .env file",
            );
        }

        let reviews_text = format_reviews(reviews, PROMPT_REVIEW_LIMIT);
        if reviews_text.is_empty() {
            return ProductAnalysis::default();
        }

        let format = product_analysis_format();
        match self
            .llm
            .call_json::<ProductAnalysis>(&reviews_text, &insights_system_prompt(), Some(&format))
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Insight generation failed: {e}");
                ProductAnalysis::placeholder("AI Error", e.to_string())
            }
        }
    }
}
