use gc_types::{CheckoutRequest, CheckoutSession, PlanCode, Subscription};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `None` when the user has never subscribed.
    pub async fn my_subscription(&self) -> Result<Option<Subscription>, ApiError> {
        match self.get("/subscriptions/me").await {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    pub async fn activate_subscription(&self) -> Result<Subscription, ApiError> {
        self.post_empty("/subscriptions/activate").await
    }

    pub async fn cancel_subscription(&self) -> Result<Subscription, ApiError> {
        self.post_empty("/subscriptions/cancel").await
    }

    pub async fn checkout_session(&self, plan: PlanCode) -> Result<CheckoutSession, ApiError> {
        self.post("/payments/checkout-session", &CheckoutRequest { plan_code: plan })
            .await
    }
}
