//! Common data types used throughout the application

use chrono::{DateTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::WEEKDAYS_PER_WEEK;

/// Availability status of an event or a schedule slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Available,
    Busy,
    Tentative,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Available => "available",
            Self::Busy => "busy",
            Self::Tentative => "tentative",
        };
        f.write_str(label)
    }
}

/// A calendar event parsed from a feed
///
/// Immutable once parsed; the merge engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub status: EventStatus,
    pub title: String,
    pub description: String,
    pub location: String,
}

/// A 30-minute slot in the weekly schedule
///
/// `original` is an index into [`WeekSchedule::events`], pointing at the
/// event last responsible for this slot's status. `None` until a
/// non-trivial event touches the slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub status: EventStatus,
    pub original: Option<usize>,
}

/// A calendar feed source (URL or local file path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub source: String,
    pub is_url: bool,
}

impl Feed {
    /// Build a feed descriptor, classifying the source as URL or file path.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let is_url = source.starts_with("http://") || source.starts_with("https://");
        Self { id: id.into(), source, is_url }
    }
}

/// The business weekdays covered by a schedule, in grid order.
pub const WEEKDAYS: [Weekday; WEEKDAYS_PER_WEEK] =
    [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];

/// Map a weekday to its position in the Monday-first grid.
///
/// Returns `None` for Saturday and Sunday; weekends are never represented
/// in a schedule.
#[must_use]
pub fn weekday_index(weekday: Weekday) -> Option<usize> {
    match weekday {
        Weekday::Mon => Some(0),
        Weekday::Tue => Some(1),
        Weekday::Wed => Some(2),
        Weekday::Thu => Some(3),
        Weekday::Fri => Some(4),
        Weekday::Sat | Weekday::Sun => None,
    }
}

/// A resolved weekly availability grid
///
/// `days` is a fixed array indexed 0=Monday..4=Friday so the
/// Monday-to-Friday-only invariant is structural and iteration order is
/// defined. Slot `original` indices point into `events`, which holds the
/// events that survived the merge filter in processing order.
#[derive(Debug, Clone, Serialize)]
pub struct WeekSchedule {
    pub year: i32,
    pub week: i32,
    pub timezone: Tz,
    pub days: [Vec<TimeSlot>; WEEKDAYS_PER_WEEK],
    pub events: Vec<Event>,
}

impl WeekSchedule {
    /// Slots for one weekday, or `None` for weekend days.
    #[must_use]
    pub fn day(&self, weekday: Weekday) -> Option<&[TimeSlot]> {
        weekday_index(weekday).map(|idx| self.days[idx].as_slice())
    }

    /// Resolve a slot's back-reference into the merged event list.
    #[must_use]
    pub fn event_for(&self, slot: &TimeSlot) -> Option<&Event> {
        slot.original.and_then(|idx| self.events.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&EventStatus::Tentative).unwrap();
        assert_eq!(json, "\"tentative\"");

        let parsed: EventStatus = serde_json::from_str("\"busy\"").unwrap();
        assert_eq!(parsed, EventStatus::Busy);
    }

    #[test]
    fn feed_classifies_sources() {
        assert!(Feed::new("work", "https://example.com/cal.ics").is_url);
        assert!(Feed::new("work", "http://example.com/cal.ics").is_url);
        assert!(!Feed::new("local", "/var/feeds/cal.ics").is_url);
    }

    #[test]
    fn weekday_index_covers_business_days_only() {
        for (idx, weekday) in WEEKDAYS.iter().enumerate() {
            assert_eq!(weekday_index(*weekday), Some(idx));
        }
        assert_eq!(weekday_index(Weekday::Sat), None);
        assert_eq!(weekday_index(Weekday::Sun), None);
    }
}
