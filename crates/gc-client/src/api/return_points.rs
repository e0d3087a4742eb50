use gc_types::{ReturnPointsPage, ReturnPointsQuery};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    pub async fn return_points(&self, query: &ReturnPointsQuery) -> Result<ReturnPointsPage, ApiError> {
        self.get_query("/return-points", &query.to_pairs()).await
    }
}
