//! The merge engine
//!
//! Folds an unordered, possibly-overlapping multi-source event list into a
//! deterministic weekly availability grid. Status priority is
//! Busy > Tentative > Available: a confirmed conflict is never hidden by a
//! tentative or free entry, regardless of input order.

use chrono::Datelike;
use chrono_tz::Tz;
use slotgrid_domain::types::weekday_index;
use slotgrid_domain::{Event, EventStatus, WeekSchedule};
use tracing::debug;

use super::grid::week_grid;
use super::week::week_bounds;

/// Merges multi-source event lists into weekly availability schedules.
///
/// A merge is a pure, synchronous pass over in-memory data; one engine can
/// serve concurrent merges for different weeks since each call builds its own
/// grid and only reads the shared event slice.
#[derive(Debug, Clone, Copy)]
pub struct MergeEngine {
    timezone: Tz,
}

impl MergeEngine {
    /// Create a merge engine for the given timezone (UTC when `None`).
    #[must_use]
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone: timezone.unwrap_or(Tz::UTC) }
    }

    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Fold `events` into the availability grid for the given ISO week.
    ///
    /// Total over its inputs: an empty event list, or a week no event
    /// touches, yields a fully available grid. Events are filtered to the
    /// week's half-open `[monday, next_monday)` range *before* any slot test,
    /// so an event on a matching weekday of some other week can never mark
    /// the grid. Weekend-starting events are dropped outright.
    #[must_use]
    pub fn merge_events(&self, events: &[Event], year: i32, week: i32) -> WeekSchedule {
        let (week_start, week_end) = week_bounds(year, week, Some(self.timezone));
        let mut days = week_grid(&week_start);

        let mut kept: Vec<Event> = events
            .iter()
            .filter(|event| weekday_index(event.start.weekday()).is_some())
            .filter(|event| event.start < week_end && event.end > week_start)
            .cloned()
            .collect();

        debug!(
            year,
            week,
            total = events.len(),
            kept = kept.len(),
            week_start = %week_start,
            "filtered events for week"
        );

        // Stable: events with equal start times keep their input order, so
        // the merge is reproducible for any tie.
        kept.sort_by(|a, b| a.start.cmp(&b.start));

        for (idx, event) in kept.iter().enumerate() {
            let Some(day_idx) = weekday_index(event.start.weekday()) else {
                continue;
            };

            // Events are bucketed by start weekday only; a multi-day event
            // marks no slots beyond its start day.
            for slot in &mut days[day_idx] {
                // Half-open overlap; a zero-duration event matches nothing.
                if event.start < slot.end && event.end > slot.start {
                    apply_status(slot, event.status, idx);
                }
            }
        }

        WeekSchedule { year, week, timezone: self.timezone, days, events: kept }
    }
}

/// Apply one event's status to an overlapping slot.
///
/// Busy always wins. Tentative wins unless the slot is already busy.
/// Available never changes the status and only refreshes the back-reference
/// while the slot is still free, so conflict attribution survives any
/// processing order.
fn apply_status(slot: &mut slotgrid_domain::TimeSlot, status: EventStatus, event_idx: usize) {
    match status {
        EventStatus::Busy => {
            slot.status = EventStatus::Busy;
            slot.original = Some(event_idx);
        }
        EventStatus::Tentative => {
            if slot.status != EventStatus::Busy {
                slot.status = EventStatus::Tentative;
                slot.original = Some(event_idx);
            }
        }
        EventStatus::Available => {
            if slot.status == EventStatus::Available {
                slot.original = Some(event_idx);
            }
        }
    }
}
