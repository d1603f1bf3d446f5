//! Slot grid construction
//!
//! A business day is 16 fixed 30-minute slots from 09:00 to 17:00 local time.
//! Until merge time a slot's identity is its time of day; the grid is built
//! against a reference Monday and re-anchored to the target week's real dates
//! before any event touches it.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use slotgrid_domain::constants::{
    BUSINESS_DAY_START_HOUR, SLOT_MINUTES, SLOTS_PER_DAY, WEEKDAYS_PER_WEEK,
};
use slotgrid_domain::{EventStatus, TimeSlot};

use super::week::localize;

/// Reference day used for slots that are not yet anchored to a real week.
/// 2000-01-03 was a Monday; any fixed date would do.
fn reference_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or(NaiveDate::MIN)
}

/// Build the 16 empty business-hour slots for one day.
///
/// Slots are anchored to a fixed reference date; callers that know the real
/// calendar day should use [`day_slots_on`] or [`week_grid`] instead.
#[must_use]
pub fn day_slots(timezone: Option<Tz>) -> Vec<TimeSlot> {
    day_slots_on(timezone.unwrap_or(Tz::UTC), reference_monday())
}

/// Build the 16 empty business-hour slots anchored to a specific date.
#[must_use]
pub fn day_slots_on(tz: Tz, date: NaiveDate) -> Vec<TimeSlot> {
    let day_start = localize(
        tz,
        date.and_hms_opt(BUSINESS_DAY_START_HOUR, 0, 0).unwrap_or_default(),
    );

    (0..SLOTS_PER_DAY)
        .map(|i| {
            let start = day_start + Duration::minutes(SLOT_MINUTES * i as i64);
            TimeSlot {
                start,
                end: start + Duration::minutes(SLOT_MINUTES),
                status: EventStatus::Available,
                original: None,
            }
        })
        .collect()
}

/// Build the empty Monday-to-Friday grid anchored to a real week.
///
/// `week_start` must be the Monday midnight produced by the week calculator;
/// day `i` of the grid lands on `week_start + i` days.
#[must_use]
pub fn week_grid(week_start: &DateTime<Tz>) -> [Vec<TimeSlot>; WEEKDAYS_PER_WEEK] {
    let tz = week_start.timezone();
    let monday = week_start.date_naive();
    std::array::from_fn(|i| day_slots_on(tz, monday + Duration::days(i as i64)))
}
