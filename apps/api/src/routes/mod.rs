pub mod health;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_reviews;
use crate::charts::handlers::handle_visualize_reviews;
use crate::reviews::handlers::handle_fetch_reviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/health") }))
        .route("/health", get(health::health_handler))
        .route("/fetch_reviews", post(handle_fetch_reviews))
        .route("/analyze_reviews", get(handle_analyze_reviews))
        .route("/visualize_reviews", get(handle_visualize_reviews))
        .with_state(state)
}
