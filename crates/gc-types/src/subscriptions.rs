use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timestamps::parse_date;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub plan_code: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub current_period_start: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<String>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.eq_ignore_ascii_case("cancelled") || self.status.eq_ignore_ascii_case("canceled")
    }

    /// Whether the user may book collections on `today`.
    ///
    /// Active and cancelled subscriptions both qualify until the paid period
    /// runs out. A subscription without a period end is grandfathered in.
    pub fn is_eligible_for_booking(&self, today: NaiveDate) -> bool {
        if !self.is_active() && !self.is_cancelled() {
            return false;
        }
        match self.current_period_end.as_deref() {
            None => true,
            Some(end) => parse_date(end).is_some_and(|end| end >= today),
        }
    }

    pub fn plan_label(&self) -> &str {
        self.plan_code.as_deref().unwrap_or("-")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanCode {
    Weekly,
    Monthly,
    Yearly,
}

impl PlanCode {
    pub const ALL: [PlanCode; 3] = [PlanCode::Weekly, PlanCode::Monthly, PlanCode::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCode::Weekly => "weekly",
            PlanCode::Monthly => "monthly",
            PlanCode::Yearly => "yearly",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PlanCode::Weekly => "Weekly",
            PlanCode::Monthly => "Monthly",
            PlanCode::Yearly => "Yearly",
        }
    }

    pub fn blurb(&self) -> &'static str {
        match self {
            PlanCode::Weekly => "1 pickup/week",
            PlanCode::Monthly => "Monthly plan",
            PlanCode::Yearly => "Yearly plan",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weekly" => Some(PlanCode::Weekly),
            "monthly" => Some(PlanCode::Monthly),
            "yearly" => Some(PlanCode::Yearly),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub plan_code: PlanCode,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSession {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(status: &str, periodEnd: Option<&str>) -> Subscription {
        Subscription {
            status: status.into(),
            current_period_end: periodEnd.map(str::to_string),
            ..Default::default()
        }
    }

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn active_without_period_end_is_grandfathered() {
        assert!(sub("active", None).is_eligible_for_booking(day("2025-01-01")));
        assert!(sub("ACTIVE", None).is_eligible_for_booking(day("2025-01-01")));
    }

    #[test]
    fn cancelled_stays_eligible_until_period_end() {
        let today = day("2025-03-10");
        assert!(sub("canceled", Some("2025-03-10")).is_eligible_for_booking(today));
        assert!(sub("cancelled", Some("2025-04-01")).is_eligible_for_booking(today));
        assert!(!sub("cancelled", Some("2025-03-09")).is_eligible_for_booking(today));
    }

    #[test]
    fn other_statuses_are_blocked() {
        let today = day("2025-03-10");
        assert!(!sub("inactive", None).is_eligible_for_booking(today));
        assert!(!sub("paused", Some("2026-01-01")).is_eligible_for_booking(today));
        assert!(!sub("", None).is_eligible_for_booking(today));
    }

    #[test]
    fn plan_codes_parse_loosely() {
        assert_eq!(PlanCode::parse(" Monthly "), Some(PlanCode::Monthly));
        assert_eq!(PlanCode::parse("daily"), None);
        let body = serde_json::to_value(CheckoutRequest { plan_code: PlanCode::Yearly }).unwrap();
        assert_eq!(body["planCode"], "yearly");
    }
}
