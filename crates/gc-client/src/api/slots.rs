use gc_types::{CollectionSlot, CollectionSlotRequest};
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// The user's recurring slot. A 404 or `null` means none is set up.
    pub async fn my_slot(&self) -> Result<Option<CollectionSlot>, ApiError> {
        match self.get("/collection-slots/me").await {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    pub async fn save_slot(&self, request: &CollectionSlotRequest) -> Result<CollectionSlot, ApiError> {
        self.put("/collection-slots/me", request).await
    }

    pub async fn delete_slot(&self) -> Result<(), ApiError> {
        self.delete("/collection-slots/me").await
    }

    pub async fn pause_slot(&self, id: i64) -> Result<(), ApiError> {
        self.slot_action(id, "pause").await
    }

    pub async fn resume_slot(&self, id: i64) -> Result<(), ApiError> {
        self.slot_action(id, "resume").await
    }

    pub async fn cancel_slot(&self, id: i64) -> Result<(), ApiError> {
        self.slot_action(id, "cancel").await
    }

    async fn slot_action(&self, id: i64, action: &str) -> Result<(), ApiError> {
        self.post_empty::<IgnoredAny>(&format!("/collection-slots/{id}/{action}"))
            .await
            .map(|_| ())
    }
}
