use gc_types::Notification;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn my_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get("/notifications/me").await
    }

    pub async fn mark_notification_read(&self, id: i64) -> Result<Notification, ApiError> {
        self.patch_empty(&format!("/notifications/{id}/read")).await
    }
}
