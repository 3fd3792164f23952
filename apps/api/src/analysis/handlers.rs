//! Axum route handlers for the analysis API.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::ngrams::TermCount;
use crate::analysis::service::{AnalysisKind, SentimentDistribution};
use crate::errors::AppError;
use crate::insights::Insight;
use crate::models::review::AnalyzedReview;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    pub app_id: Option<u64>,
    pub analysis_kind: Option<AnalysisKind>,
    /// LLM insight generation; adds several seconds. Defaults to on.
    pub use_ai: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub app_id: u64,
    pub min_rating: u8,
    pub max_rating: u8,
    pub requested_limit: usize,
    pub returned_reviews: usize,
    pub analysis_kind: AnalysisKind,
    pub average_rating: f64,
    pub rating_distribution: BTreeMap<u8, usize>,
    pub negative_keywords: Vec<TermCount>,
    pub sentiment_distribution: Option<SentimentDistribution>,
    pub ai_actionable_insights: Vec<Insight>,
    pub reviews: Vec<AnalyzedReview>,
}

/// GET /analyze_reviews
///
/// Runs metrics (and optionally sentiment) over the cached batch, then asks the
/// insight generator for the top problems when `use_ai` is set.
pub async fn handle_analyze_reviews(
    State(state): State<AppState>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Query(query) = query?;
    let app_id = query.app_id.unwrap_or(state.config.default_app_id);
    let analysis_kind = query.analysis_kind.unwrap_or_default();
    let use_ai = query.use_ai.unwrap_or(true);

    let batch = state.cache.require(app_id).await?;
    info!(
        "Analyzing {} cached reviews for app {app_id} (fetched {}, kind {analysis_kind:?})",
        batch.reviews.len(),
        batch.fetched_at.to_rfc3339()
    );

    // Lexicon scoring and YAKE are CPU-bound; keep them off the async workers.
    let analyzer = state.analyzer.clone();
    let reviews = batch.reviews.clone();
    let core = tokio::task::spawn_blocking(move || analyzer.analyze(&reviews, analysis_kind))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("analysis task failed: {e}")))?;

    let ai_actionable_insights = if use_ai {
        state.insights.generate(&batch.reviews).await.top_issues
    } else {
        Vec::new()
    };

    Ok(Json(AnalyzeResponse {
        app_id,
        min_rating: batch.min_rating,
        max_rating: batch.max_rating,
        requested_limit: batch.requested_limit,
        returned_reviews: batch.reviews.len(),
        analysis_kind,
        average_rating: core.average_rating,
        rating_distribution: core.rating_distribution,
        negative_keywords: core.negative_keywords,
        sentiment_distribution: core.sentiment_distribution,
        ai_actionable_insights,
        reviews: core.reviews,
    }))
}
