use gc_types::{LoginRequest, RegisterRequest, TokenResponse, User};
use serde::de::IgnoredAny;
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Exchanges credentials for a bearer token and stores it.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: TokenResponse = self.post_public("/auth/login", &request).await?;
        let token = response.token().ok_or(ApiError::MissingToken)?.to_string();
        self.tokens().set(&token);
        info!("logged in as {}", request.email);
        Ok(token)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_public::<_, IgnoredAny>("/auth/register", request)
            .await
            .map(|_| ())
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me").await
    }

    pub fn logout(&self) {
        self.tokens().clear();
    }
}
