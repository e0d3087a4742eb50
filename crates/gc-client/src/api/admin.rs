use gc_types::{
    AdminClaimReview, AdminCollection, AdminDriver, AdminMetrics, AdminNotificationRequest,
    AdminPayoutRequest, AssignDriverRequest, Claim, CollectionStatusUpdate, DriverPayout,
    NewDriver,
};
use serde::de::IgnoredAny;

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn admin_metrics(&self) -> Result<AdminMetrics, ApiError> {
        self.get("/admin/metrics").await
    }

    pub async fn admin_collections(&self, status: Option<&str>) -> Result<Vec<AdminCollection>, ApiError> {
        let query: Vec<(&str, String)> = status
            .filter(|s| !s.is_empty())
            .map(|s| vec![("status", s.to_string())])
            .unwrap_or_default();
        self.get_query("/admin/collections", &query).await
    }

    pub async fn assign_driver(&self, collectionId: i64, driverId: i64) -> Result<AdminCollection, ApiError> {
        self.patch(
            &format!("/admin/collections/{collectionId}/assign-driver"),
            &AssignDriverRequest { driver_id: driverId },
        )
        .await
    }

    pub async fn process_collection(&self, collectionId: i64) -> Result<AdminCollection, ApiError> {
        self.patch(
            &format!("/admin/collections/{collectionId}/status"),
            &CollectionStatusUpdate::processed(),
        )
        .await
    }

    pub async fn admin_drivers(&self) -> Result<Vec<AdminDriver>, ApiError> {
        self.get("/admin/drivers").await
    }

    pub async fn create_driver(&self, driver: &NewDriver) -> Result<AdminDriver, ApiError> {
        self.post("/admin/drivers", driver).await
    }

    pub async fn admin_payouts(&self) -> Result<Vec<DriverPayout>, ApiError> {
        self.get("/admin/payouts").await
    }

    pub async fn create_payout(&self, request: &AdminPayoutRequest) -> Result<DriverPayout, ApiError> {
        self.post("/admin/payouts", request).await
    }

    pub async fn admin_claims(&self) -> Result<Vec<Claim>, ApiError> {
        self.get("/admin/claims").await
    }

    pub async fn review_claim(&self, id: i64, review: &AdminClaimReview) -> Result<Claim, ApiError> {
        self.patch(&format!("/admin/claims/{id}"), review).await
    }

    pub async fn broadcast_notification(&self, request: &AdminNotificationRequest) -> Result<(), ApiError> {
        self.post::<_, IgnoredAny>("/admin/notifications", request)
            .await
            .map(|_| ())
    }
}
