use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/healthz", get(get_health))
}

async fn get_health() -> Json<Health> {
    Json(Health { status: "ok" })
}
