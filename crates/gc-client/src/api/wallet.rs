use gc_types::{DonateRequest, RedeemRequest, WalletBalance, WalletHistory};
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn wallet_balance(&self) -> Result<WalletBalance, ApiError> {
        self.get("/wallet/balance").await
    }

    pub async fn wallet_history(&self, page: u32, pageSize: u32) -> Result<WalletHistory, ApiError> {
        self.get_query(
            "/wallet/history",
            &[("page", page.to_string()), ("pageSize", pageSize.to_string())],
        )
        .await
    }

    pub async fn donate(&self, request: &DonateRequest) -> Result<(), ApiError> {
        self.post::<_, IgnoredAny>("/wallet/donate", request).await.map(|_| ())
    }

    pub async fn redeem(&self, request: &RedeemRequest) -> Result<(), ApiError> {
        self.post::<_, IgnoredAny>("/wallet/redeem", request).await.map(|_| ())
    }
}
