use gc_types::ProfileUpdate;
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.patch::<_, IgnoredAny>("/users/me", update).await.map(|_| ())
    }

    pub async fn delete_account(&self) -> Result<(), ApiError> {
        self.delete("/users/me").await
    }
}
