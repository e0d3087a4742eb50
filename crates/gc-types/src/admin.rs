//! Admin console payloads. The admin metrics and collections endpoints
//! speak snake_case; the rest of the admin surface is camelCase.

use serde::{Deserialize, Serialize};

use crate::drivers::non_blank;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AdminMetrics {
    #[serde(default)]
    pub users_total: u64,
    #[serde(default)]
    pub active_subscriptions: u64,
    #[serde(default)]
    pub collections_total: u64,
    #[serde(default)]
    pub collections_scheduled: u64,
    #[serde(default)]
    pub voucher_total_cents: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdminCollection {
    pub id: i64,
    pub user_id: i64,
    pub return_point_id: i64,
    pub scheduled_at: String,
    pub status: String,
    #[serde(default)]
    pub bag_count: u32,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub driver_id: Option<i64>,
    #[serde(default)]
    pub proof_url: Option<String>,
}

impl AdminCollection {
    pub fn can_assign(&self) -> bool {
        self.status.eq_ignore_ascii_case("scheduled") || self.status.eq_ignore_ascii_case("assigned")
    }

    pub fn can_process(&self) -> bool {
        self.status.eq_ignore_ascii_case("collected") || self.status.eq_ignore_ascii_case("completed")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDriver {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub vehicle_plate: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_available: bool,
}

impl AdminDriver {
    pub fn label(&self) -> String {
        match (&self.vehicle_type, &self.vehicle_plate) {
            (Some(kind), Some(plate)) => format!("#{} · {kind} {plate}", self.id),
            (Some(kind), None) => format!("#{} · {kind}", self.id),
            (None, Some(plate)) => format!("#{} · {plate}", self.id),
            (None, None) => format!("Driver #{}", self.id),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl NewDriver {
    pub fn from_form(
        email: &str,
        password: &str,
        fullName: &str,
        vehicleType: &str,
        vehiclePlate: &str,
        phone: &str,
    ) -> Option<Self> {
        let email = email.trim();
        if email.is_empty() || password.len() < 6 {
            return None;
        }
        Some(Self {
            email: email.to_string(),
            password: password.to_string(),
            full_name: non_blank(fullName),
            vehicle_type: non_blank(vehicleType),
            vehicle_plate: non_blank(vehiclePlate),
            phone: non_blank(phone),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignDriverRequest {
    pub driver_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CollectionStatusUpdate {
    pub status: String,
}

impl CollectionStatusUpdate {
    pub fn processed() -> Self {
        Self {
            status: "processed".into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminPayoutRequest {
    pub driver_id: i64,
    pub amount_cents: i64,
    pub note: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminClaimReview {
    pub status: String,
    pub admin_response: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminNotificationRequest {
    pub user_id: Option<i64>,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_default_missing_counters() {
        let metrics: AdminMetrics =
            serde_json::from_str(r#"{"users_total":12,"voucher_total_cents":450}"#).unwrap();
        assert_eq!(metrics.users_total, 12);
        assert_eq!(metrics.collections_total, 0);
    }

    #[test]
    fn new_driver_needs_email_and_password() {
        assert!(NewDriver::from_form("", "secret1", "", "", "", "").is_none());
        assert!(NewDriver::from_form("d@x.ie", "short", "", "", "", "").is_none());

        let driver = NewDriver::from_form("d@x.ie", "secret1", "Dee", "", "", "").unwrap();
        let body = serde_json::to_value(&driver).unwrap();
        assert_eq!(body["fullName"], "Dee");
        assert!(body.get("vehicleType").is_none());
    }

    #[test]
    fn collection_actions_follow_status() {
        let collection: AdminCollection = serde_json::from_str(
            r#"{"id":1,"user_id":2,"return_point_id":3,"scheduled_at":"2025-01-01T09:00:00","status":"collected","bag_count":2}"#,
        )
        .unwrap();
        assert!(collection.can_process());
        assert!(!collection.can_assign());
    }
}
