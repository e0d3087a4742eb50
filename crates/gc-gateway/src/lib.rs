#![allow(non_snake_case)]

pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Base URL of the REST API, without a trailing slash.
    pub upstream: String,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(upstream: &str) -> Self {
        Self {
            upstream: upstream.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

pub fn gateway_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::proxy::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
