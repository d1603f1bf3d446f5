//! ISO-8601 week arithmetic
//!
//! ISO week 1 of a year is the week containing January 4th, and weeks start
//! on Monday. All week boundaries are computed on naive dates first and only
//! then localized, so a DST transition can never shift a Monday midnight.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Monday (as a calendar date) of the given ISO week.
///
/// Week numbers outside 1..=53 are not validated; the arithmetic simply
/// extrapolates, so week 0 is the Monday seven days before week 1 and week 54
/// lands in the following ISO year.
fn monday_of_iso_week(year: i32, week: i32) -> NaiveDate {
    // January 4th is always inside ISO week 1.
    let jan4 = NaiveDate::from_ymd_opt(year, 1, 4).unwrap_or(NaiveDate::MIN);
    let week1_monday = jan4 - Duration::days(i64::from(jan4.weekday().num_days_from_monday()));
    week1_monday + Duration::days((i64::from(week) - 1) * 7)
}

/// The Monday 00:00:00 instant that begins the given ISO week.
///
/// `timezone` defaults to UTC when `None`; that default is part of the
/// contract, not an error path. There are no failure conditions.
#[must_use]
pub fn first_day_of_iso_week(year: i32, week: i32, timezone: Option<Tz>) -> DateTime<Tz> {
    let tz = timezone.unwrap_or(Tz::UTC);
    localize_midnight(tz, monday_of_iso_week(year, week))
}

/// Half-open `[monday, next_monday)` bounds of the given ISO week.
#[must_use]
pub fn week_bounds(year: i32, week: i32, timezone: Option<Tz>) -> (DateTime<Tz>, DateTime<Tz>) {
    let tz = timezone.unwrap_or(Tz::UTC);
    let monday = monday_of_iso_week(year, week);
    (localize_midnight(tz, monday), localize_midnight(tz, monday + Duration::days(7)))
}

/// The ISO (year, week) an instant belongs to.
#[must_use]
pub fn week_of<T: TimeZone>(instant: &DateTime<T>) -> (i32, i32) {
    let iso = instant.iso_week();
    (iso.year(), iso.week() as i32)
}

/// Localize midnight of a calendar date in `tz`.
pub(crate) fn localize_midnight(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

/// Resolve a naive local time to an instant in `tz`.
///
/// Ambiguous times (fall-back transition) take the earlier instant. Times
/// inside a spring-forward gap are pushed forward in 30-minute steps until
/// they exist; no real zone has a gap anywhere near the probe cap.
pub(crate) fn localize(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..48 {
                probe += Duration::minutes(30);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt;
                }
            }
            tz.from_utc_datetime(&naive)
        }
    }
}
