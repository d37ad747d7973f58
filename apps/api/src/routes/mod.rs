pub mod health;

use axum::{routing::get, Router};

use crate::cv::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public read-only pages
        .route("/", get(handlers::handle_home))
        .route("/cv", get(handlers::handle_cv_page))
        .with_state(state)
}
