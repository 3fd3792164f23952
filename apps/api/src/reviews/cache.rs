use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::review::Review;

/// The most recent batch fetched for one app, plus the filters that produced it.
#[derive(Debug, Clone)]
pub struct CachedBatch {
    pub min_rating: u8,
    pub max_rating: u8,
    pub requested_limit: usize,
    pub reviews: Arc<Vec<Review>>,
    pub fetched_at: DateTime<Utc>,
}

/// In-process review cache keyed by App Store id.
/// A new fetch for an app replaces its previous batch.
#[derive(Clone, Default)]
pub struct ReviewCache {
    batches: Arc<RwLock<HashMap<u64, CachedBatch>>>,
}

impl ReviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, app_id: u64, batch: CachedBatch) {
        self.batches.write().await.insert(app_id, batch);
    }

    pub async fn get(&self, app_id: u64) -> Option<CachedBatch> {
        self.batches.read().await.get(&app_id).cloned()
    }

    /// Returns the cached batch for `app_id`, or the 404 the read endpoints surface
    /// when nothing (or nothing useful) has been fetched yet.
    pub async fn require(&self, app_id: u64) -> Result<CachedBatch, AppError> {
        let batch = self.get(app_id).await.ok_or_else(|| {
            AppError::NotFound(
                "No cached reviews for this app_id. Call /fetch_reviews first.".to_string(),
            )
        })?;

        if batch.reviews.is_empty() {
            return Err(AppError::NotFound("Cached reviews list is empty".to_string()));
        }

        Ok(batch)
    }
}
