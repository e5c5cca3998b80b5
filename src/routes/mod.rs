// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::Aggregator;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: Arc<Aggregator>,
}

pub fn app(aggregator: Arc<Aggregator>) -> Router {
    let state = AppState { aggregator };
    Router::new()
        .route("/", get(http::containers_handler)) // GET /
        .route("/self", get(http::self_handler)) // GET /self
        .route("/version", get(http::version_handler)) // GET /version
        .fallback(http::not_found_handler)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
