use gc_types::{Claim, ClaimRequest};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn submit_claim(&self, request: &ClaimRequest) -> Result<Claim, ApiError> {
        self.post("/claims", request).await
    }

    pub async fn my_claims(&self) -> Result<Vec<Claim>, ApiError> {
        self.get("/claims/me").await
    }
}
