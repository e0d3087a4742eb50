use serde::{Deserialize, Serialize};

use crate::collections::Collection;

/// Driver-facing collections share the user collection payload.
pub type DriverCollection = Collection;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
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

/// PATCH body for `/drivers/me/profile`; blank inputs become `null`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfileUpdate {
    pub vehicle_type: Option<String>,
    pub vehicle_plate: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl DriverProfileUpdate {
    pub fn from_form(vehicleType: &str, vehiclePlate: &str, phone: &str) -> Self {
        Self {
            vehicle_type: non_blank(vehicleType),
            vehicle_plate: non_blank(vehiclePlate),
            phone: non_blank(phone),
            is_available: None,
        }
    }
}

pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Driver status filter on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriverFilter {
    #[default]
    All,
    Assigned,
    Collected,
}

impl DriverFilter {
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            DriverFilter::All => None,
            DriverFilter::Assigned => Some("assigned"),
            DriverFilter::Collected => Some("collected"),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "assigned" => DriverFilter::Assigned,
            "collected" => DriverFilter::Collected,
            _ => DriverFilter::All,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarkCollectedRequest {
    pub proof_url: Option<String>,
}

impl MarkCollectedRequest {
    pub fn from_form(proofUrl: &str) -> Self {
        Self {
            proof_url: non_blank(proofUrl),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverEarning {
    pub id: i64,
    pub driver_id: i64,
    pub collection_id: i64,
    pub amount_cents: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DriverEarningsBalance {
    pub balance_cents: i64,
    #[serde(default)]
    pub earnings: Vec<DriverEarning>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverPayout {
    pub id: i64,
    pub driver_id: i64,
    pub amount_cents: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_update_sends_nulls_for_blank_fields() {
        let update = DriverProfileUpdate::from_form(" Van ", "", "  ");
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["vehicleType"], "Van");
        assert!(body["vehiclePlate"].is_null());
        assert!(body["phone"].is_null());
        assert!(body.get("isAvailable").is_none());
    }

    #[test]
    fn filter_maps_to_query_value() {
        assert_eq!(DriverFilter::parse("assigned").as_query(), Some("assigned"));
        assert_eq!(DriverFilter::parse("all").as_query(), None);
    }
}
