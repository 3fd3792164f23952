//! Axum route handlers for the review fetch API.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::reviews::cache::CachedBatch;
use crate::reviews::fetcher::FetchRequest;
use crate::state::AppState;

/// Apple never returns more than 500 reviews (10 pages of 50).
pub const MAX_FETCH_LIMIT: usize = 500;

#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    pub app_id: Option<u64>,
    pub min_rating: Option<u8>,
    pub max_rating: Option<u8>,
    pub limit: Option<usize>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub app_id: u64,
    pub min_rating: u8,
    pub max_rating: u8,
    pub requested_limit: usize,
    pub returned_reviews: usize,
    pub message: String,
}

/// Validates query parameters and fills defaults.
fn build_fetch_request(
    query: FetchQuery,
    default_app_id: u64,
    default_country: &str,
) -> Result<FetchRequest, AppError> {
    let min_rating = query.min_rating.unwrap_or(1);
    let max_rating = query.max_rating.unwrap_or(5);
    let limit = query.limit.unwrap_or(MAX_FETCH_LIMIT);

    if !(1..=5).contains(&min_rating) {
        return Err(AppError::Validation("min_rating must be between 1 and 5".to_string()));
    }
    if !(1..=5).contains(&max_rating) {
        return Err(AppError::Validation("max_rating must be between 1 and 5".to_string()));
    }
    if min_rating > max_rating {
        return Err(AppError::Validation("min_rating must be <= max_rating".to_string()));
    }
    if !(1..=MAX_FETCH_LIMIT).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {MAX_FETCH_LIMIT}"
        )));
    }

    let country = query
        .country
        .unwrap_or_else(|| default_country.to_string())
        .to_ascii_lowercase();
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::Validation(
            "country must be a two-letter storefront code".to_string(),
        ));
    }

    Ok(FetchRequest {
        app_id: query.app_id.unwrap_or(default_app_id),
        country,
        min_rating,
        max_rating,
        limit,
    })
}

/// POST /fetch_reviews
///
/// Fetches reviews from the RSS feed, filters by rating and caches the batch.
/// Analytics are computed later by /analyze_reviews.
pub async fn handle_fetch_reviews(
    State(state): State<AppState>,
    query: Result<Query<FetchQuery>, QueryRejection>,
) -> Result<Json<FetchResponse>, AppError> {
    let Query(query) = query?;
    let request = build_fetch_request(
        query,
        state.config.default_app_id,
        &state.config.rss_country,
    )?;

    let reviews = state.review_source.fetch(&request).await?;

    if reviews.is_empty() {
        return Err(AppError::NotFound("No reviews fetched from Apple RSS".to_string()));
    }

    let returned_reviews = reviews.len();
    info!(
        "Cached {returned_reviews} reviews for app {} (ratings {}-{})",
        request.app_id, request.min_rating, request.max_rating
    );

    state
        .cache
        .insert(
            request.app_id,
            CachedBatch {
                min_rating: request.min_rating,
                max_rating: request.max_rating,
                requested_limit: request.limit,
                reviews: Arc::new(reviews),
                fetched_at: Utc::now(),
            },
        )
        .await;

    Ok(Json(FetchResponse {
        app_id: request.app_id,
        min_rating: request.min_rating,
        max_rating: request.max_rating,
        requested_limit: request.limit,
        returned_reviews,
        message: "Reviews fetched and cached successfully. Call /analyze_reviews to get metrics."
            .to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> FetchQuery {
        FetchQuery {
            app_id: None,
            min_rating: None,
            max_rating: None,
            limit: None,
            country: None,
        }
    }

    #[test]
    fn test_defaults_fill_in() {
        let request = build_fetch_request(query(), 1447033725, "us").unwrap();
        assert_eq!(request.app_id, 1447033725);
        assert_eq!(request.country, "us");
        assert_eq!((request.min_rating, request.max_rating), (1, 5));
        assert_eq!(request.limit, 500);
    }

    #[test]
    fn test_min_above_max_rejected() {
        let q = FetchQuery {
            min_rating: Some(4),
            max_rating: Some(2),
            ..query()
        };
        assert!(matches!(
            build_fetch_request(q, 1, "us"),
            Err(AppError::Validation(msg)) if msg.contains("<=")
        ));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let q = FetchQuery {
            max_rating: Some(6),
            ..query()
        };
        assert!(matches!(build_fetch_request(q, 1, "us"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_limit_bounds() {
        for limit in [0, 501] {
            let q = FetchQuery {
                limit: Some(limit),
                ..query()
            };
            assert!(build_fetch_request(q, 1, "us").is_err(), "limit {limit} accepted");
        }
    }

    #[test]
    fn test_country_is_normalized_and_checked() {
        let q = FetchQuery {
            country: Some("GB".to_string()),
            ..query()
        };
        assert_eq!(build_fetch_request(q, 1, "us").unwrap().country, "gb");

        let q = FetchQuery {
            country: Some("../x".to_string()),
            ..query()
        };
        assert!(build_fetch_request(q, 1, "us").is_err());
    }
}
