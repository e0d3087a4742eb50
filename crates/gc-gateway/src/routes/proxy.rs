//! Same-origin `/api/*` forwarder so the browser never talks to the REST
//! API across origins.

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use http::header;
use serde::Serialize;
use tracing::{debug, warn};

use crate::AppState;

/// Request headers passed through to the upstream.
const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT];

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/*rest", any(forward))
}

pub fn upstream_url(upstream: &str, rest: &str, query: Option<&str>) -> String {
    let mut url = format!("{upstream}/{}", rest.trim_start_matches('/'));
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

async fn forward(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = upstream_url(&state.upstream, &rest, uri.query());
    debug!(%method, %url, "forwarding");

    let mut request = state.http.request(method.clone(), &url);
    for name in FORWARDED_HEADERS.iter() {
        if let Some(value) = headers.get(name) {
            request = request.header(name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream = match request.send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(%method, %url, "upstream request failed: {e}");
            return bad_gateway(format!("Upstream unavailable: {e}"));
        }
    };

    let status = upstream.status();
    let contentType = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let payload = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(%url, "failed to read upstream body: {e}");
            return bad_gateway(format!("Upstream response unreadable: {e}"));
        }
    };

    let mut response = Response::builder().status(status);
    if let Some(value) = contentType {
        response = response.header(header::CONTENT_TYPE, value);
    }
    response
        .body(Body::from(payload))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn bad_gateway(detail: String) -> Response {
    (StatusCode::BAD_GATEWAY, Json(ErrorResponse { detail })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_path_and_query() {
        assert_eq!(
            upstream_url("http://api:8000", "wallet/history", Some("page=2&pageSize=10")),
            "http://api:8000/wallet/history?page=2&pageSize=10"
        );
        assert_eq!(upstream_url("http://api:8000", "/auth/me", Some("")), "http://api:8000/auth/me");
    }
}
