use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

use crate::handles::*;
use crate::services::SampleCache;

/// Read-only local status app: the embedded monitor page and the latest
/// sample as JSON. No write routes by design.
pub fn create_app(cache: Arc<SampleCache>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/sensor", get(get_latest_sample))
        .with_state(StatusState { cache })
        .layer(CorsLayer::permissive())
}
