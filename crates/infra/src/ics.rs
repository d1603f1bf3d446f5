//! ICS document parsing
//!
//! Turns raw ICS bytes into domain [`Event`] records. Only the fields the
//! merge engine and renderer consume are extracted; recurrence rules are out
//! of scope and ignored.
//!
//! Date-times are decoded from compact ISO-8601 (`yyyymmddThhmmss`, optional
//! trailing `Z` for UTC) and plain dates (`yyyymmdd`). An event missing a
//! usable DTSTART or DTEND is dropped with a warning so it can never reach
//! the overlap test.

use std::io::BufReader;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use slotgrid_core::FeedParser;
use slotgrid_domain::{Event, EventStatus, Result, SlotgridError};
use tracing::{debug, warn};

/// ICS parser bound to the schedule timezone.
///
/// Floating (zone-less) date-times in a feed are interpreted in this
/// timezone; `Z`-suffixed ones are converted into it.
#[derive(Debug, Clone, Copy)]
pub struct IcsParser {
    timezone: Tz,
}

impl IcsParser {
    /// Create a parser for the given timezone (UTC when `None`).
    #[must_use]
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone: timezone.unwrap_or(Tz::UTC) }
    }

    fn event_from(&self, vevent: &IcalEvent) -> Option<Event> {
        let mut start = None;
        let mut end = None;
        let mut status = EventStatus::Available;
        let mut title = String::new();
        let mut description = String::new();
        let mut location = String::new();

        for property in &vevent.properties {
            let value = property.value.as_deref().unwrap_or("");
            match property.name.as_str() {
                "DTSTART" => start = self.parse_datetime(value),
                "DTEND" => end = self.parse_datetime(value),
                "SUMMARY" => title = value.trim().to_string(),
                "DESCRIPTION" => description = value.trim().to_string(),
                "LOCATION" => location = value.trim().to_string(),
                "STATUS" => status = parse_status(value),
                _ => {}
            }
        }

        // Some private feeds publish availability in the summary instead of
        // the status field; "BUSY" anywhere in the title wins.
        if title.to_uppercase().contains("BUSY") {
            status = EventStatus::Busy;
        }

        let (Some(start), Some(end)) = (start, end) else {
            warn!(title = %title, "dropping event without a usable DTSTART/DTEND");
            return None;
        };

        Some(Event { start, end, status, title, description, location })
    }

    fn parse_datetime(&self, raw: &str) -> Option<DateTime<Tz>> {
        let raw = raw.trim();

        if let Some(stripped) = raw.strip_suffix('Z') {
            let naive = NaiveDateTime::parse_from_str(stripped, "%Y%m%dT%H%M%S").ok()?;
            return Some(Utc.from_utc_datetime(&naive).with_timezone(&self.timezone));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S") {
            return self.timezone.from_local_datetime(&naive).earliest();
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y%m%d") {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return self.timezone.from_local_datetime(&midnight).earliest();
        }

        None
    }
}

impl FeedParser for IcsParser {
    fn parse(&self, data: &[u8]) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        for calendar in ical::IcalParser::new(BufReader::new(data)) {
            let calendar = calendar
                .map_err(|err| SlotgridError::Feed(format!("invalid ICS document: {err}")))?;

            for vevent in &calendar.events {
                if let Some(event) = self.event_from(vevent) {
                    events.push(event);
                }
            }
        }

        debug!(count = events.len(), "parsed events from feed");
        Ok(events)
    }
}

/// Map an ICS STATUS value onto an availability status.
///
/// Outlook publishes every entry as CONFIRMED; unknown or absent values are
/// treated as available rather than rejected.
fn parse_status(raw: &str) -> EventStatus {
    match raw.trim().to_uppercase().as_str() {
        "TENTATIVE" => EventStatus::Tentative,
        "BUSY" => EventStatus::Busy,
        _ => EventStatus::Available,
    }
}
