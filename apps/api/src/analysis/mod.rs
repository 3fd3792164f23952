// Review analysis: rating metrics, complaint keywords and n-grams, sentiment.
// Sentiment and keyword backends sit behind traits; see sentiment.rs and keywords.rs.

pub mod handlers;
pub mod keywords;
pub mod metrics;
pub mod ngrams;
pub mod sentiment;
pub mod service;
pub mod text;
