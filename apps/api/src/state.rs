use std::sync::Arc;

use crate::analysis::service::ReviewAnalyzer;
use crate::config::Config;
use crate::insights::InsightGenerator;
use crate::reviews::cache::ReviewCache;
use crate::reviews::fetcher::ReviewSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Most recent fetched batch per app id.
    pub cache: ReviewCache,
    /// Pluggable review source. Default: AppleRssClient.
    pub review_source: Arc<dyn ReviewSource>,
    pub analyzer: ReviewAnalyzer,
    /// Pluggable insight generator. Default: LlmInsightGenerator.
    pub insights: Arc<dyn InsightGenerator>,
}
