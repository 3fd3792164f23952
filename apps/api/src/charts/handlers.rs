//! Axum route handlers for the visualization API.

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Deserialize;

use crate::analysis::metrics::compute_metrics;
use crate::analysis::ngrams::{
    extract_negative_bigrams, extract_negative_keywords, extract_negative_ngram_2_3,
    extract_negative_trigrams,
};
use crate::charts::bars::{render_rating_bars, render_term_bars};
use crate::charts::infographic::render_insights;
use crate::charts::{SvgImage, VisualizationKind};
use crate::errors::AppError;
use crate::state::AppState;

pub const DEFAULT_TOP_K: usize = 20;
const TOP_K_RANGE: std::ops::RangeInclusive<usize> = 5..=100;

#[derive(Debug, Deserialize)]
pub struct VisualizeQuery {
    pub app_id: Option<u64>,
    pub kind: Option<VisualizationKind>,
    /// How many keywords / n-grams to plot.
    pub top_k: Option<usize>,
}

/// GET /visualize_reviews
///
/// Renders one chart over the cached batch.
pub async fn handle_visualize_reviews(
    State(state): State<AppState>,
    query: Result<Query<VisualizeQuery>, QueryRejection>,
) -> Result<SvgImage, AppError> {
    let Query(query) = query?;
    let app_id = query.app_id.unwrap_or(state.config.default_app_id);
    let kind = query.kind.unwrap_or_default();
    let top_k = query.top_k.unwrap_or(DEFAULT_TOP_K);

    if !TOP_K_RANGE.contains(&top_k) {
        return Err(AppError::Validation(format!(
            "top_k must be between {} and {}",
            TOP_K_RANGE.start(),
            TOP_K_RANGE.end()
        )));
    }

    let batch = state.cache.require(app_id).await?;
    let reviews = batch.reviews.as_slice();

    let svg = match kind {
        VisualizationKind::Ratings => {
            let metrics = compute_metrics(reviews);
            render_rating_bars(
                &format!("Rating distribution for app_id={app_id}"),
                &metrics.rating_distribution,
            )?
        }
        VisualizationKind::AiInsights => {
            let analysis = state.insights.generate(reviews).await;
            render_insights(
                &format!("AI Actionable Insights for App ID {app_id}"),
                &analysis.top_issues,
            )?
        }
        VisualizationKind::NegativeKeywords
        | VisualizationKind::NegativeBigrams
        | VisualizationKind::NegativeTrigrams
        | VisualizationKind::NegativeNgram23 => {
            let (items, title, missing) = match kind {
                VisualizationKind::NegativeKeywords => (
                    extract_negative_keywords(reviews, top_k),
                    format!("Top {top_k} negative keywords"),
                    "No negative keywords",
                ),
                VisualizationKind::NegativeBigrams => (
                    extract_negative_bigrams(reviews, top_k),
                    format!("Top {top_k} negative bigrams"),
                    "No bigrams",
                ),
                VisualizationKind::NegativeTrigrams => (
                    extract_negative_trigrams(reviews, top_k),
                    format!("Top {top_k} negative trigrams"),
                    "No trigrams",
                ),
                _ => (
                    extract_negative_ngram_2_3(reviews, top_k),
                    format!("Top {top_k} negative n-grams (2-3)"),
                    "No n-grams",
                ),
            };

            if items.is_empty() {
                return Err(AppError::NotFound(missing.to_string()));
            }

            render_term_bars(&title, &items, kind.color())?
        }
    };

    Ok(SvgImage(svg))
}
