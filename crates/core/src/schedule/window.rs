//! Publish window planning
//!
//! A run publishes one document per ISO week from one month behind `now` to
//! the configured number of months ahead. Planning is pure date arithmetic;
//! the run loop decides what to do with each target.

use chrono::{DateTime, Months};
use chrono_tz::Tz;

use super::week::{first_day_of_iso_week, week_of};

/// One week the run loop should publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTarget {
    pub year: i32,
    pub week: i32,
    /// True when the week ended before the current week began.
    pub is_past: bool,
    /// True for the ISO week containing `now`.
    pub is_current: bool,
}

impl WeekTarget {
    /// Relative path of this week's document in the schedule tree,
    /// `past/2025-W07.md` or `future/2025-W09.md`.
    #[must_use]
    pub fn document_path(&self) -> String {
        let bucket = if self.is_past { "past" } else { "future" };
        format!("{bucket}/{}-W{:02}.md", self.year, self.week)
    }
}

/// Plan the weeks to publish around `now`.
///
/// The window runs from one month behind `now` to `months_ahead` months
/// ahead, stepped in whole ISO weeks. The current week is always included
/// and flagged; ordering is chronological.
#[must_use]
pub fn plan_weeks(now: &DateTime<Tz>, months_ahead: u32) -> Vec<WeekTarget> {
    let tz = now.timezone();
    let window_start = now.checked_sub_months(Months::new(1)).unwrap_or_else(|| *now);
    let window_end =
        now.checked_add_months(Months::new(months_ahead)).unwrap_or_else(|| *now);

    let (current_year, current_week) = week_of(now);
    let current_monday = first_day_of_iso_week(current_year, current_week, Some(tz));

    let (start_year, start_week) = week_of(&window_start);
    let mut monday = first_day_of_iso_week(start_year, start_week, Some(tz));

    let mut targets = Vec::new();
    while monday < window_end {
        let (year, week) = week_of(&monday);
        targets.push(WeekTarget {
            year,
            week,
            is_past: monday < current_monday,
            is_current: (year, week) == (current_year, current_week),
        });
        monday = first_day_of_iso_week(year, week + 1, Some(tz));
    }

    targets
}

/// True once the Friday-evening cutover has passed and the front page
/// should show next week's schedule.
#[must_use]
pub fn past_friday_cutover(now: &DateTime<Tz>) -> bool {
    use chrono::{Datelike, Timelike, Weekday};
    now.weekday() == Weekday::Fri && now.hour() >= 18
}
