use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use gc_gateway::{gateway_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as has_header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = gateway_router(AppState::new("http://127.0.0.1:9"));
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn forwards_path_query_and_bearer() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wallet/history"))
        .and(query_param("page", "2"))
        .and(has_header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = gateway_router(AppState::new(&upstream.uri()));
    let response = app
        .oneshot(
            Request::get("/api/wallet/history?page=2&pageSize=5")
                .header(header::AUTHORIZATION, "Bearer tok")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["total"], 0);
}

#[tokio::test]
async fn forwards_method_and_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/users/me"))
        .and(body_json(json!({"full_name": "Ada", "address": "1 Main St"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = gateway_router(AppState::new(&upstream.uri()));
    let response = app
        .oneshot(
            Request::patch("/api/users/me")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"full_name":"Ada","address":"1 Main St"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn relays_upstream_errors_verbatim() {
    let upstream = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/collections/3"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Collection not found"})))
        .mount(&upstream)
        .await;

    let app = gateway_router(AppState::new(&upstream.uri()));
    let response = app
        .oneshot(Request::delete("/api/collections/3").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(json_body(response).await["detail"], "Collection not found");
}

#[tokio::test]
async fn unreachable_upstream_is_bad_gateway() {
    let app = gateway_router(AppState::new("http://127.0.0.1:9"));
    let response = app
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body["detail"].as_str().unwrap().starts_with("Upstream unavailable"));
}
