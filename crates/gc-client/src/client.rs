use std::fmt;
use std::sync::Arc;

use reqwest::{header, Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{error_message, ApiError};
use crate::token::TokenStore;

/// Called after a 401 once the stored token has been cleared. The browser
/// build uses it to send the user to the login page.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Whether a request carries the bearer token and reacts to 401.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.tokens.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(baseUrl: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            base_url: baseUrl.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            tokens,
            on_unauthorized: None,
        }
    }

    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, &[], None, Auth::Bearer).await
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send(Method::GET, path, query, None, Auth::Bearer).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.send(Method::POST, path, &[], Some(body), Auth::Bearer).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::POST, path, &[], None, Auth::Bearer).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.send(Method::PUT, path, &[], Some(body), Auth::Bearer).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.send(Method::PATCH, path, &[], Some(body), Auth::Bearer).await
    }

    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::PATCH, path, &[], None, Auth::Bearer).await
    }

    /// DELETE, discarding whatever the server answers with.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send::<IgnoredAny>(Method::DELETE, path, &[], None, Auth::Bearer)
            .await
            .map(|_| ())
    }

    /// POST to an endpoint that does not take a bearer token (login,
    /// registration). A 401 here is a plain error, not a session expiry.
    pub(crate) async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_json(body)?;
        self.send(Method::POST, path, &[], Some(body), Auth::Public).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
        auth: Auth,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%method, %url, "api request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if auth == Auth::Bearer {
            if let Some(token) = self.tokens.get() {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, %url, "api request failed: {e}");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED && auth == Auth::Bearer {
            debug!(%url, "unauthorized, clearing token");
            self.tokens.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text, status.canonical_reason().unwrap_or("Request failed"));
            debug!(%url, status = status.as_u16(), %message, "api error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        decode_body(status, &text)
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// 204 and empty bodies decode as JSON `null`, which yields `()` or `None`.
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, ApiError> {
    let payload = if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        "null"
    } else {
        text
    };
    serde_json::from_str(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;

    #[test]
    fn joins_base_and_path() {
        let client = ApiClient::new("http://localhost:8000/", Arc::new(MemoryTokenStore::new()));
        assert_eq!(client.url("/auth/me"), "http://localhost:8000/auth/me");
        assert_eq!(client.url("wallet/balance"), "http://localhost:8000/wallet/balance");
    }

    #[test]
    fn empty_bodies_decode_to_unit_or_none() {
        let unit: () = decode_body(StatusCode::NO_CONTENT, "").unwrap();
        assert_eq!(unit, ());
        let none: Option<gc_types::Subscription> = decode_body(StatusCode::OK, "  ").unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let result: Result<gc_types::WalletBalance, _> = decode_body(StatusCode::OK, "<html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
