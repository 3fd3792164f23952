//! Review source. Pulls customer reviews from Apple's public RSS feed.
//!
//! `AppState` holds an `Arc<dyn ReviewSource>`; `AppleRssClient` is the
//! production implementation.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::review::Review;
use crate::reviews::parser::{parse_feed, parse_review, RawReview};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("all {pages} RSS pages failed to load")]
    AllPagesFailed { pages: u32 },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a single feed page produced nothing usable.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What to fetch: one app on one storefront, filtered by rating.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub app_id: u64,
    pub country: String,
    pub min_rating: u8,
    pub max_rating: u8,
    pub limit: usize,
}

#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Review>, FetchError>;
}

/// Fetches every feed page concurrently over a shared reqwest client.
#[derive(Clone)]
pub struct AppleRssClient {
    client: Client,
    base_url: String,
    max_pages: u32,
}

impl AppleRssClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.rss_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.apple_rss_base_url.trim_end_matches('/').to_string(),
            max_pages: config.rss_max_pages,
        })
    }

    async fn fetch_page(
        &self,
        app_id: u64,
        country: &str,
        page: u32,
    ) -> Result<Vec<RawReview>, PageError> {
        let url = feed_url(&self.base_url, country, app_id, page);
        info!("Fetching RSS page {page}: {url}");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PageError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(parse_feed(&body)?)
    }
}

#[async_trait]
impl ReviewSource for AppleRssClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Review>, FetchError> {
        let pages = (1..=self.max_pages)
            .map(|page| self.fetch_page(request.app_id, &request.country, page));

        // join_all keeps page order regardless of completion order
        let results = join_all(pages).await;

        collect_reviews(results, request)
    }
}

pub fn feed_url(base_url: &str, country: &str, app_id: u64, page: u32) -> String {
    format!("{base_url}/{country}/rss/customerreviews/page={page}/id={app_id}/sortBy=mostRecent/json")
}

/// Merges per-page results into one numbered batch.
///
/// Failed and empty pages are skipped. Only when every page failed is the
/// fetch itself an error; an empty but reachable feed is an empty batch.
pub fn collect_reviews(
    pages: Vec<Result<Vec<RawReview>, PageError>>,
    request: &FetchRequest,
) -> Result<Vec<Review>, FetchError> {
    let total_pages = pages.len() as u32;
    let mut failed = 0u32;
    let mut collected = Vec::new();

    for (idx, outcome) in pages.into_iter().enumerate() {
        let page = idx + 1;
        match outcome {
            Ok(reviews) if reviews.is_empty() => {
                info!("RSS page {page} returned no reviews");
            }
            Ok(reviews) => collected.extend(
                reviews
                    .into_iter()
                    .filter(|r| (request.min_rating..=request.max_rating).contains(&r.rating)),
            ),
            Err(e) => {
                warn!("RSS page {page} skipped: {e}");
                failed += 1;
            }
        }
    }

    if total_pages > 0 && failed == total_pages {
        return Err(FetchError::AllPagesFailed { pages: total_pages });
    }

    Ok(collected
        .into_iter()
        .take(request.limit)
        .zip(1u32..)
        .map(|(raw, recall_id)| parse_review(raw, recall_id))
        .collect())
}
