use gc_types::{Collection, CollectionsPage, CreateCollection};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn my_collections(
        &self,
        page: u32,
        pageSize: u32,
        status: Option<&str>,
    ) -> Result<CollectionsPage, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            query.push(("status", status.to_string()));
        }
        query.push(("page", page.to_string()));
        query.push(("pageSize", pageSize.to_string()));
        self.get_query("/collections/me", &query).await
    }

    pub async fn create_collection(&self, payload: &CreateCollection) -> Result<Collection, ApiError> {
        self.post("/collections", payload).await
    }

    pub async fn cancel_collection(&self, id: i64) -> Result<Collection, ApiError> {
        self.patch_empty(&format!("/collections/{id}/cancel")).await
    }

    pub async fn delete_collection(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/collections/{id}")).await
    }
}
