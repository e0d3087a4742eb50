use gc_types::{
    DriverCollection, DriverEarningsBalance, DriverFilter, DriverPayout, DriverProfile,
    DriverProfileUpdate, MarkCollectedRequest,
};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn driver_profile(&self) -> Result<DriverProfile, ApiError> {
        self.get("/drivers/me/profile").await
    }

    pub async fn update_driver_profile(
        &self,
        update: &DriverProfileUpdate,
    ) -> Result<DriverProfile, ApiError> {
        self.patch("/drivers/me/profile", update).await
    }

    pub async fn driver_collections(
        &self,
        filter: DriverFilter,
    ) -> Result<Vec<DriverCollection>, ApiError> {
        let query: Vec<(&str, String)> = filter
            .as_query()
            .map(|status| vec![("status", status.to_string())])
            .unwrap_or_default();
        self.get_query("/drivers/me/collections", &query).await
    }

    pub async fn mark_collected(
        &self,
        id: i64,
        request: &MarkCollectedRequest,
    ) -> Result<DriverCollection, ApiError> {
        self.patch(&format!("/drivers/me/collections/{id}/mark-collected"), request)
            .await
    }

    pub async fn driver_earnings(&self) -> Result<DriverEarningsBalance, ApiError> {
        self.get("/drivers/me/earnings").await
    }

    pub async fn driver_payouts(&self) -> Result<Vec<DriverPayout>, ApiError> {
        self.get("/drivers/me/payouts").await
    }
}
