use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::schedule::{short_time, weekday_label};
use crate::timestamps::parse_timestamp;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub scheduled_at: String,
    pub return_point_id: i64,
    pub status: String,
    #[serde(default)]
    pub bag_count: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub driver_id: Option<i64>,
    #[serde(default)]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub voucher_amount_cents: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Collection {
    pub fn status_is(&self, status: &str) -> bool {
        self.status.eq_ignore_ascii_case(status)
    }

    /// Only scheduled pickups can be cancelled by the user.
    pub fn can_cancel(&self) -> bool {
        self.status_is("scheduled")
    }

    /// Cancelled pickups can be removed from the list.
    pub fn can_remove(&self) -> bool {
        self.status_is("canceled") || self.status_is("cancelled")
    }
}

/// True when any non-cancelled collection is still ahead of `now`.
pub fn has_upcoming_one_off(items: &[Collection], now: NaiveDateTime) -> bool {
    items.iter().any(|c| {
        !c.can_remove()
            && parse_timestamp(&c.scheduled_at).is_some_and(|scheduled| scheduled >= now)
    })
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsPage {
    #[serde(default)]
    pub items: Vec<Collection>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl CollectionsPage {
    pub fn total_pages(&self, pageSize: u32) -> u32 {
        total_pages(self.total, pageSize)
    }
}

/// Number of pages for `total` rows, never less than one.
pub fn total_pages(total: u64, pageSize: u32) -> u32 {
    if pageSize == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(pageSize));
    u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VoucherPreference {
    #[default]
    Wallet,
    Donate,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollection {
    pub scheduled_at: String,
    pub return_point_id: i64,
    pub bag_count: u32,
    pub notes: Option<String>,
    pub voucher_preference: VoucherPreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charity_id: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charity {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CHARITIES: &[Charity] = &[
    Charity { id: "friends_of_earth", name: "Friends of the Earth Ireland" },
    Charity { id: "irish_cancer_society", name: "Irish Cancer Society" },
    Charity { id: "barnardos", name: "Barnardos Ireland" },
    Charity { id: "an_taisce", name: "An Taisce" },
    Charity { id: "clean_coasts", name: "Clean Coasts" },
];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SlotFrequency {
    #[default]
    Weekly,
    Fortnightly,
    #[serde(rename = "every_2_weeks")]
    EveryTwoWeeks,
    Monthly,
}

impl SlotFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotFrequency::Weekly => "weekly",
            SlotFrequency::Fortnightly => "fortnightly",
            SlotFrequency::EveryTwoWeeks => "every_2_weeks",
            SlotFrequency::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SlotFrequency::Weekly => "Weekly",
            SlotFrequency::Fortnightly | SlotFrequency::EveryTwoWeeks => "Every 2 weeks",
            SlotFrequency::Monthly => "Monthly",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "fortnightly" => SlotFrequency::Fortnightly,
            "every_2_weeks" => SlotFrequency::EveryTwoWeeks,
            "monthly" => SlotFrequency::Monthly,
            _ => SlotFrequency::Weekly,
        }
    }
}

/// Reads `frequency` leniently: `null`, unknown or oddly cased values fall
/// back to weekly instead of failing the whole slot.
fn lenient_frequency<'de, D>(deserializer: D) -> Result<SlotFrequency, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| SlotFrequency::parse(&value.trim().to_ascii_lowercase()))
        .unwrap_or_default())
}

/// The user's recurring pickup definition from `/collection-slots/me`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSlot {
    #[serde(default)]
    pub id: Option<i64>,
    pub weekday: u8,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub preferred_return_point_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_frequency")]
    pub frequency: SlotFrequency,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl CollectionSlot {
    fn status_is(&self, status: &str) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(status))
    }

    /// The backend reports both "canceled" and "cancelled".
    pub fn is_cancelled(&self) -> bool {
        self.status_is("cancelled") || self.status_is("canceled")
    }

    pub fn is_paused(&self) -> bool {
        self.status_is("paused")
    }

    /// An enabled slot blocks one-off bookings.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or_else(|| self.status_is("active"))
    }

    pub fn window(&self) -> String {
        format!("{}–{}", short_time(&self.start_time), short_time(&self.end_time))
    }

    /// e.g. `Weekly • Mon • 08:00–10:00 • Tesco Dundrum (Active)`.
    pub fn summary(&self, returnPointName: Option<&str>) -> String {
        let statusLabel = if self.is_paused() { "Paused" } else { "Active" };
        let mut text = format!(
            "{} • {} • {}",
            self.frequency.label(),
            weekday_label(self.weekday),
            self.window()
        );
        if let Some(name) = returnPointName {
            text.push_str(" • ");
            text.push_str(name);
        }
        text.push_str(&format!(" ({statusLabel})"));
        text
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSlotRequest {
    pub weekday: u8,
    pub start_time: String,
    pub end_time: String,
    pub preferred_return_point_id: Option<i64>,
    pub frequency: SlotFrequency,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(status: &str, scheduledAt: &str) -> Collection {
        Collection {
            id: 1,
            user_id: Some(1),
            scheduled_at: scheduledAt.into(),
            return_point_id: 3,
            status: status.into(),
            bag_count: Some(2),
            notes: None,
            driver_id: None,
            proof_url: None,
            voucher_amount_cents: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn upcoming_ignores_cancelled_and_past() {
        let now = NaiveDateTime::parse_from_str("2025-05-01T12:00", "%Y-%m-%dT%H:%M").unwrap();
        let past = collection("scheduled", "2025-04-30T10:00:00");
        let cancelled = collection("canceled", "2025-05-03T10:00:00");
        assert!(!has_upcoming_one_off(&[past.clone(), cancelled.clone()], now));

        let upcoming = collection("Scheduled", "2025-05-02T09:00:00");
        assert!(has_upcoming_one_off(&[past, cancelled, upcoming], now));
    }

    #[test]
    fn slot_frequency_tolerates_null_and_unknown_values() {
        let slot = |frequency: &str| -> CollectionSlot {
            serde_json::from_str(&format!(
                r#"{{"id":4,"weekday":1,"startTime":"08:00:00","endTime":"10:00:00","frequency":{frequency},"status":"active"}}"#
            ))
            .unwrap()
        };
        assert_eq!(slot("null").frequency, SlotFrequency::Weekly);
        assert_eq!(slot(r#""biweekly""#).frequency, SlotFrequency::Weekly);
        assert_eq!(slot(r#""Monthly""#).frequency, SlotFrequency::Monthly);
        assert_eq!(slot(r#""every_2_weeks""#).frequency, SlotFrequency::EveryTwoWeeks);

        let missing: CollectionSlot = serde_json::from_str(
            r#"{"weekday":3,"startTime":"09:00:00","endTime":"11:00:00"}"#,
        )
        .unwrap();
        assert_eq!(missing.frequency, SlotFrequency::Weekly);
    }

    #[test]
    fn slot_enabled_falls_back_to_status() {
        let mut slot: CollectionSlot = serde_json::from_str(
            r#"{"id":4,"weekday":1,"startTime":"08:00:00","endTime":"10:00:00","preferredReturnPointId":2,"frequency":"weekly","status":"active"}"#,
        )
        .unwrap();
        assert!(slot.is_enabled());

        slot.enabled = Some(false);
        assert!(!slot.is_enabled());

        slot.enabled = None;
        slot.status = Some("canceled".into());
        assert!(!slot.is_enabled());
        assert!(slot.is_cancelled());
    }

    #[test]
    fn slot_summary_reads_naturally() {
        let slot = CollectionSlot {
            id: Some(1),
            weekday: 1,
            start_time: "08:00:00".into(),
            end_time: "10:00:00".into(),
            preferred_return_point_id: Some(2),
            frequency: SlotFrequency::Weekly,
            status: Some("paused".into()),
            enabled: None,
        };
        assert_eq!(
            slot.summary(Some("Tesco Dundrum")),
            "Weekly • Mon • 08:00–10:00 • Tesco Dundrum (Paused)"
        );
    }

    #[test]
    fn frequency_round_trips_backend_spelling() {
        let json = serde_json::to_string(&SlotFrequency::EveryTwoWeeks).unwrap();
        assert_eq!(json, "\"every_2_weeks\"");
        assert_eq!(SlotFrequency::parse("monthly"), SlotFrequency::Monthly);
        assert_eq!(SlotFrequency::parse("???"), SlotFrequency::Weekly);
    }

    #[test]
    fn create_payload_omits_charity_for_wallet() {
        let payload = CreateCollection {
            scheduled_at: "2025-05-02T09:00:00".into(),
            return_point_id: 5,
            bag_count: 2,
            notes: None,
            voucher_preference: VoucherPreference::Wallet,
            charity_id: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["voucherPreference"], "wallet");
        assert_eq!(value["returnPointId"], 5);
        assert!(value.get("charityId").is_none());
    }

    #[test]
    fn page_count_never_drops_below_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 1);
    }
}
