use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gc_client::{ApiClient, ApiError, MemoryTokenStore, TokenStore};
use gc_types::money::format_cents;
use gc_types::{CreateCollection, DriverFilter, VoucherPreference};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_token(server: &MockServer, token: Option<&str>) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    });
    let client = ApiClient::new(server.uri(), store.clone());
    (client, store)
}

#[tokio::test]
async fn wallet_balance_is_formatted_for_a_logged_in_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "email": "sam@example.ie",
            "full_name": "Sam",
            "is_admin": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wallet/balance"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "balanceCents": 1230,
            "lastUpdated": "2025-05-01T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok-1"));
    let user = client.me().await.unwrap();
    assert_eq!(user.home_path(), "/wallet");

    let balance = client.wallet_balance().await.unwrap();
    assert_eq!(format_cents(balance.balance_cents), "€12.30");
}

#[tokio::test]
async fn unauthorized_clears_token_and_fires_hook() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/claims/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let (client, store) = client_with_token(&server, Some("expired"));
    let client = client.with_unauthorized_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = client.my_claims().await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
    assert!(!store.is_authenticated());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn bearer_header_is_only_sent_with_a_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/return-points"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "total": 0})))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, None);
    client
        .return_points(&gc_types::ReturnPointsQuery::all(100))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn error_message_comes_from_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/collections"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Please add an address first"})),
        )
        .mount(&server)
        .await;

    let (client, store) = client_with_token(&server, Some("tok"));
    let payload = CreateCollection {
        scheduled_at: "2030-01-01T09:00:00".into(),
        return_point_id: 1,
        bag_count: 1,
        notes: None,
        voucher_preference: VoucherPreference::Wallet,
        charity_id: None,
    };
    let err = client.create_collection(&payload).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Please add an address first");
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn error_without_body_uses_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/metrics"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    let err = client.admin_metrics().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 503,
            message: "Service Unavailable".into()
        }
    );
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/collections/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    client.delete_collection(42).await.unwrap();
}

#[tokio::test]
async fn login_stores_token_from_either_spelling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.ie", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "mock-token"})))
        .mount(&server)
        .await;

    let (client, store) = client_with_token(&server, None);
    let token = client.login(" a@b.ie ", "secret1").await.unwrap();
    assert_eq!(token, "mock-token");
    assert_eq!(store.get().as_deref(), Some("mock-token"));
}

#[tokio::test]
async fn login_without_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})))
        .mount(&server)
        .await;

    let (client, store) = client_with_token(&server, None);
    let err = client.login("a@b.ie", "secret1").await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);
    assert_eq!(err.to_string(), "Invalid auth response: missing access_token");
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn wrong_password_is_not_a_session_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})))
        .mount(&server)
        .await;

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let (client, _) = client_with_token(&server, None);
    let client = client.with_unauthorized_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = client.login("a@b.ie", "nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn collections_are_requested_by_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collections/me"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "id": 11,
                "userId": 7,
                "scheduledAt": "2030-02-01T09:00:00",
                "returnPointId": 3,
                "status": "scheduled",
                "bagCount": 2
            }],
            "total": 11,
            "page": 2,
            "pageSize": 10
        })))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    let page = client.my_collections(2, 10, None).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].can_cancel());
    assert_eq!(page.total_pages(10), 2);
}

#[tokio::test]
async fn missing_slot_and_subscription_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection-slots/me"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "No slot"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/subscriptions/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    assert_eq!(client.my_slot().await.unwrap(), None);
    assert_eq!(client.my_subscription().await.unwrap(), None);
}

#[tokio::test]
async fn removing_the_slot_deletes_it_and_tolerates_null_frequency() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/collection-slots/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "weekday": 2,
            "startTime": "10:00:00",
            "endTime": "12:00:00",
            "frequency": null,
            "status": "active"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/collection-slots/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    let slot = client.my_slot().await.unwrap().unwrap();
    assert!(slot.summary(None).starts_with("Weekly • "));
    client.delete_slot().await.unwrap();
}

#[tokio::test]
async fn driver_filter_becomes_status_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drivers/me/collections"))
        .and(query_param("status", "assigned"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    let rows = client.driver_collections(DriverFilter::Assigned).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn assign_driver_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/collections/5/assign-driver"))
        .and(body_json(json!({"driverId": 9})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "user_id": 1,
            "return_point_id": 2,
            "scheduled_at": "2030-01-01T10:00:00",
            "status": "assigned",
            "bag_count": 1,
            "driver_id": 9
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client_with_token(&server, Some("tok"));
    let updated = client.assign_driver(5, 9).await.unwrap();
    assert_eq!(updated.driver_id, Some(9));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let store = Arc::new(MemoryTokenStore::with_token("tok"));
    let client = ApiClient::new("http://127.0.0.1:9", store);
    let err = client.wallet_balance().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
