//! Booking rules for one-off collections and recurring pickup slots.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use crate::collections::{CollectionSlot, CollectionSlotRequest, SlotFrequency};

/// Drivers only run between 08:00 and 20:00, both ends inclusive.
pub const SERVICE_START_MINUTES: u32 = 8 * 60;
pub const SERVICE_END_MINUTES: u32 = 20 * 60;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please choose a date and time.")]
    MissingDateTime,
    #[error("Please choose a return point.")]
    MissingReturnPoint,
    #[error("Date must be today or later.")]
    InPast,
    #[error("You can only book collections between 08:00 and 20:00.")]
    OutsideServiceHours,
    #[error("Bag count must be at least 1.")]
    InvalidBagCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("Please choose a weekday.")]
    MissingWeekday,
    #[error("Please choose a start and end time.")]
    MissingTimes,
    #[error("Please select a preferred return point.")]
    MissingReturnPoint,
    #[error("You can only book collections between 08:00 and 20:00.")]
    OutsideServiceHours,
}

/// Minutes since midnight for `HH:MM` or `HH:MM:SS`.
pub fn time_to_minutes(value: &str) -> Option<u32> {
    let mut parts = value.trim().split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

pub fn is_within_service_hours(value: &str) -> bool {
    match time_to_minutes(value) {
        Some(minutes) => (SERVICE_START_MINUTES..=SERVICE_END_MINUTES).contains(&minutes),
        None => false,
    }
}

/// `HH:MM` -> `HH:MM:SS`, which is what the slot endpoint stores.
pub fn normalize_time(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() == 5 {
        format!("{trimmed}:00")
    } else {
        trimmed.to_string()
    }
}

/// `HH:MM:SS` -> `HH:MM` for display and `<input type="time">`.
pub fn short_time(value: &str) -> String {
    value.trim().chars().take(5).collect()
}

pub fn weekday_label(weekday: u8) -> &'static str {
    WEEKDAY_LABELS
        .get(usize::from(weekday))
        .copied()
        .unwrap_or(WEEKDAY_LABELS[0])
}

/// Validates the one-off collection form and returns the `scheduledAt`
/// value to send (`YYYY-MM-DDTHH:MM:00`).
pub fn validate_booking(
    date: &str,
    time: &str,
    now: NaiveDateTime,
) -> Result<String, BookingError> {
    let date = date.trim();
    let time = time.trim();
    if date.is_empty() || time.is_empty() {
        return Err(BookingError::MissingDateTime);
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| BookingError::InPast)?;
    let minutes = time_to_minutes(time).ok_or(BookingError::OutsideServiceHours)?;
    let clock = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or(BookingError::OutsideServiceHours)?;
    let scheduled = day.and_time(clock);

    if scheduled < now {
        return Err(BookingError::InPast);
    }
    if !is_within_service_hours(time) {
        return Err(BookingError::OutsideServiceHours);
    }

    Ok(scheduled.format("%Y-%m-%dT%H:%M:%S").to_string())
}

/// Raw values of the recurring schedule form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlotDraft {
    pub weekday: Option<u8>,
    pub start_time: String,
    pub end_time: String,
    pub preferred_return_point_id: Option<i64>,
    pub frequency: SlotFrequency,
}

impl SlotDraft {
    /// Form values for an existing slot. The two fortnightly spellings
    /// share one option in the form.
    pub fn from_slot(slot: &CollectionSlot) -> Self {
        let frequency = match slot.frequency {
            SlotFrequency::EveryTwoWeeks => SlotFrequency::Fortnightly,
            other => other,
        };
        Self {
            weekday: Some(slot.weekday),
            start_time: short_time(&slot.start_time),
            end_time: short_time(&slot.end_time),
            preferred_return_point_id: slot.preferred_return_point_id,
            frequency,
        }
    }
}

pub fn validate_slot(draft: &SlotDraft) -> Result<CollectionSlotRequest, SlotError> {
    let preferred = draft
        .preferred_return_point_id
        .ok_or(SlotError::MissingReturnPoint)?;
    let weekday = draft.weekday.filter(|d| *d < 7).ok_or(SlotError::MissingWeekday)?;
    if draft.start_time.trim().is_empty() || draft.end_time.trim().is_empty() {
        return Err(SlotError::MissingTimes);
    }
    if !is_within_service_hours(&draft.start_time) || !is_within_service_hours(&draft.end_time) {
        return Err(SlotError::OutsideServiceHours);
    }

    Ok(CollectionSlotRequest {
        weekday,
        start_time: normalize_time(&draft.start_time),
        end_time: normalize_time(&draft.end_time),
        preferred_return_point_id: Some(preferred),
        frequency: draft.frequency,
    })
}

/// One row per weekday, Sunday first, with the pickup window on the
/// slot's day. A cancelled or missing slot leaves every day empty.
pub fn weekly_rows(slot: Option<&CollectionSlot>) -> Vec<(&'static str, Option<String>)> {
    let active = slot.filter(|s| !s.is_cancelled());
    WEEKDAY_LABELS
        .iter()
        .enumerate()
        .map(|(day, label)| {
            let window = active
                .filter(|s| usize::from(s.weekday) == day)
                .map(CollectionSlot::window);
            (*label, window)
        })
        .collect()
}

/// Value for the `min` attribute of the booking date input.
pub fn min_booking_date(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn service_window_is_inclusive() {
        assert!(is_within_service_hours("08:00"));
        assert!(is_within_service_hours("20:00"));
        assert!(is_within_service_hours("13:45:00"));
        assert!(!is_within_service_hours("07:59"));
        assert!(!is_within_service_hours("20:01"));
        assert!(!is_within_service_hours(""));
        assert!(!is_within_service_hours("25:00"));
    }

    #[test]
    fn booking_outside_hours_is_rejected() {
        let now = at("2025-06-01T09:00");
        assert_eq!(
            validate_booking("2025-06-02", "21:30", now),
            Err(BookingError::OutsideServiceHours)
        );
        assert_eq!(
            validate_booking("2025-06-02", "06:15", now),
            Err(BookingError::OutsideServiceHours)
        );
    }

    #[test]
    fn booking_in_the_past_is_rejected() {
        let now = at("2025-06-10T12:00");
        assert_eq!(
            validate_booking("2025-06-09", "10:00", now),
            Err(BookingError::InPast)
        );
        assert_eq!(
            validate_booking("2025-06-10", "11:59", now),
            Err(BookingError::InPast)
        );
        assert_eq!(
            BookingError::InPast.to_string(),
            "Date must be today or later."
        );
    }

    #[test]
    fn valid_booking_yields_iso_timestamp() {
        let now = at("2025-06-10T12:00");
        assert_eq!(
            validate_booking("2025-06-10", "14:30", now).unwrap(),
            "2025-06-10T14:30:00"
        );
    }

    #[test]
    fn booking_requires_both_fields() {
        let now = at("2025-06-10T12:00");
        assert_eq!(
            validate_booking("", "10:00", now),
            Err(BookingError::MissingDateTime)
        );
        assert_eq!(
            validate_booking("2025-06-11", " ", now),
            Err(BookingError::MissingDateTime)
        );
    }

    #[test]
    fn slot_requires_return_point_first() {
        let draft = SlotDraft {
            weekday: Some(1),
            start_time: "09:00".into(),
            end_time: "11:00".into(),
            ..Default::default()
        };
        assert_eq!(validate_slot(&draft), Err(SlotError::MissingReturnPoint));
    }

    #[test]
    fn slot_times_must_be_in_service_window() {
        let draft = SlotDraft {
            weekday: Some(3),
            start_time: "19:00".into(),
            end_time: "21:00".into(),
            preferred_return_point_id: Some(4),
            frequency: SlotFrequency::Weekly,
        };
        assert_eq!(validate_slot(&draft), Err(SlotError::OutsideServiceHours));
    }

    #[test]
    fn slot_times_are_normalized() {
        let draft = SlotDraft {
            weekday: Some(2),
            start_time: "09:00".into(),
            end_time: "10:30:00".into(),
            preferred_return_point_id: Some(4),
            frequency: SlotFrequency::Fortnightly,
        };
        let request = validate_slot(&draft).unwrap();
        assert_eq!(request.start_time, "09:00:00");
        assert_eq!(request.end_time, "10:30:00");
        assert_eq!(request.weekday, 2);
    }

    #[test]
    fn weekday_labels_start_on_sunday() {
        assert_eq!(weekday_label(0), "Sun");
        assert_eq!(weekday_label(6), "Sat");
        assert_eq!(weekday_label(9), "Sun");
        assert_eq!(short_time("08:30:00"), "08:30");
    }

    #[test]
    fn draft_from_slot_matches_untouched_form() {
        let slot = CollectionSlot {
            id: Some(7),
            weekday: 4,
            start_time: "09:00:00".into(),
            end_time: "11:30:00".into(),
            preferred_return_point_id: Some(2),
            frequency: SlotFrequency::EveryTwoWeeks,
            status: Some("active".into()),
            enabled: None,
        };
        let draft = SlotDraft::from_slot(&slot);
        assert_eq!(draft.start_time, "09:00");
        assert_eq!(draft.frequency, SlotFrequency::Fortnightly);

        let form = SlotDraft {
            weekday: Some(4),
            start_time: "09:00".into(),
            end_time: "11:30".into(),
            preferred_return_point_id: Some(2),
            frequency: SlotFrequency::Fortnightly,
        };
        assert_eq!(draft, form);
    }

    #[test]
    fn weekly_rows_mark_only_the_slot_day() {
        let mut slot = CollectionSlot {
            id: Some(1),
            weekday: 2,
            start_time: "08:00:00".into(),
            end_time: "10:00:00".into(),
            preferred_return_point_id: None,
            frequency: SlotFrequency::Weekly,
            status: Some("active".into()),
            enabled: None,
        };
        let rows = weekly_rows(Some(&slot));
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ("Sun", None));
        assert_eq!(rows[2], ("Tue", Some("08:00–10:00".to_string())));

        slot.status = Some("cancelled".into());
        assert!(weekly_rows(Some(&slot)).iter().all(|(_, w)| w.is_none()));
        assert!(weekly_rows(None).iter().all(|(_, w)| w.is_none()));
    }
}
