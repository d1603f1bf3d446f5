//! Markdown schedule rendering
//!
//! Renders a resolved [`WeekSchedule`] into the markdown document that gets
//! committed to the schedule repository. Event details are anonymized before
//! they reach the page; only availability and a generic meeting label leak
//! out.

use chrono::{DateTime, Datelike, Duration, Offset};
use chrono_tz::Tz;
use slotgrid_core::{first_day_of_iso_week, week_of};
use slotgrid_domain::utils::privacy::{anonymize_location, anonymize_title};
use slotgrid_domain::{EventStatus, TimeSlot, WeekSchedule};

const DAY_HEADERS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Renders weekly schedules as markdown documents.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    booking_url: String,
}

impl MarkdownRenderer {
    pub fn new(booking_url: impl Into<String>) -> Self {
        Self { booking_url: booking_url.into() }
    }

    /// Render one week's schedule.
    ///
    /// `now` drives the navigation links (whether neighbouring weeks live
    /// under `/past/` or `/future/`) and the last-updated footer.
    #[must_use]
    pub fn render_week(&self, schedule: &WeekSchedule, now: &DateTime<Tz>) -> String {
        let tz = schedule.timezone;
        let week_start = first_day_of_iso_week(schedule.year, schedule.week, Some(tz));
        let week_friday = week_start + Duration::days(4);

        let mut out = String::new();

        out.push_str(&format!(
            "# Schedule for {} - {}, {} (Week {})\n\n",
            week_start.format("%b %-d"),
            week_friday.format("%b %-d"),
            week_friday.year(),
            schedule.week,
        ));

        let offset_hours = week_start.offset().fix().local_minus_utc() / 3600;
        out.push_str(&format!("Timezone: {tz} (UTC{offset_hours:+})\n\n"));

        out.push_str("| Time | ");
        out.push_str(&DAY_HEADERS.join(" | "));
        out.push_str(" |\n|------|");
        out.push_str(&"--------|".repeat(DAY_HEADERS.len()));
        out.push('\n');

        let rows = schedule.days[0].len();
        for row in 0..rows {
            let reference = &schedule.days[0][row];
            out.push_str(&format!(
                "| {} - {} |",
                reference.start.format("%-I:%M %p"),
                reference.end.format("%-I:%M %p"),
            ));
            for day in &schedule.days {
                out.push_str(&format!(" {} |", self.render_slot(schedule, &day[row])));
            }
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&format!(
            "[← Previous week]({}) | [This week](/README.md) | [Next week →]({})\n\n",
            self.nav_link(schedule.year, schedule.week - 1, now),
            self.nav_link(schedule.year, schedule.week + 1, now),
        ));

        out.push_str("Legend: 🟢 Available · 🔴 Busy · 🟡 Tentative\n\n");
        out.push_str(&format!("Last updated: {}\n", now.format("%Y-%m-%d %H:%M %Z")));

        out
    }

    fn render_slot(&self, schedule: &WeekSchedule, slot: &TimeSlot) -> String {
        match slot.status {
            EventStatus::Available => format!("🟢 [Available]({})", self.booking_url),
            EventStatus::Busy => Self::occupied_cell("🔴", "Busy", schedule, slot),
            EventStatus::Tentative => Self::occupied_cell("🟡", "Tentative", schedule, slot),
        }
    }

    /// Cell for a busy or tentative slot.
    ///
    /// When the slot can be attributed to an event, the anonymized title is
    /// shown (with the placeholder meeting link if the event had one);
    /// otherwise the bare status word is used.
    fn occupied_cell(
        indicator: &str,
        fallback: &str,
        schedule: &WeekSchedule,
        slot: &TimeSlot,
    ) -> String {
        match schedule.event_for(slot) {
            Some(event) => {
                let label = anonymize_title(&event.title);
                let link = anonymize_location(&event.location);
                if link.is_empty() {
                    format!("{indicator} {label}")
                } else {
                    format!("{indicator} [{label}]({link})")
                }
            }
            None => format!("{indicator} {fallback}"),
        }
    }

    fn nav_link(&self, year: i32, week: i32, now: &DateTime<Tz>) -> String {
        let tz = now.timezone();
        let monday = first_day_of_iso_week(year, week, Some(tz));
        let (target_year, target_week) = week_of(&monday);

        let (current_year, current_week) = week_of(now);
        let current_monday = first_day_of_iso_week(current_year, current_week, Some(tz));

        let bucket = if monday < current_monday { "past" } else { "future" };
        format!("/{bucket}/{target_year}-W{target_week:02}.md")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use slotgrid_core::MergeEngine;
    use slotgrid_domain::Event;

    use super::*;

    fn schedule_with_busy_hour() -> WeekSchedule {
        let start = Tz::UTC.with_ymd_and_hms(2025, 2, 17, 10, 0, 0).unwrap();
        let event = Event {
            start,
            end: start + Duration::hours(1),
            status: EventStatus::Busy,
            title: "Budget review with finance".to_string(),
            description: String::new(),
            location: "https://zoom.us/j/5551234".to_string(),
        };
        MergeEngine::new(Some(Tz::UTC)).merge_events(&[event], 2025, 8)
    }

    fn now() -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(2025, 2, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn renders_header_and_one_row_per_slot() {
        let doc = MarkdownRenderer::new("https://cal.com").render_week(&schedule_with_busy_hour(), &now());

        assert!(doc.starts_with("# Schedule for Feb 17 - Feb 21, 2025 (Week 8)"));
        assert!(doc.contains("Timezone: UTC (UTC+0)"));
        assert!(doc.contains("| Time | Monday | Tuesday | Wednesday | Thursday | Friday |"));
        // 16 slot rows.
        assert_eq!(doc.matches("| 9:00 AM").count() + doc.matches("| 10:00 AM").count(), 2);
        assert_eq!(doc.lines().filter(|l| l.contains(" AM - ") || l.contains(" PM - ")).count(), 16);
    }

    #[test]
    fn busy_slots_are_anonymized() {
        let doc = MarkdownRenderer::new("https://cal.com").render_week(&schedule_with_busy_hour(), &now());

        assert!(doc.contains("🔴 [Meeting](https://meet.xyz)"));
        assert!(!doc.contains("Budget review"));
        assert!(!doc.contains("zoom.us"));
    }

    #[test]
    fn available_slots_link_to_the_booking_url() {
        let doc = MarkdownRenderer::new("https://cal.com/me").render_week(&schedule_with_busy_hour(), &now());
        assert!(doc.contains("🟢 [Available](https://cal.com/me)"));
    }

    #[test]
    fn navigation_buckets_weeks_around_now() {
        // Rendering W08 while inside W08: prev is past, next is future.
        let doc = MarkdownRenderer::new("https://cal.com").render_week(&schedule_with_busy_hour(), &now());
        assert!(doc.contains("[← Previous week](/past/2025-W07.md)"));
        assert!(doc.contains("[Next week →](/future/2025-W09.md)"));
    }

    #[test]
    fn navigation_normalizes_year_boundaries() {
        // W01 of 2026; previous week is 2025-W52.
        let schedule = MergeEngine::new(Some(Tz::UTC)).merge_events(&[], 2026, 1);
        let now = Tz::UTC.with_ymd_and_hms(2025, 12, 30, 12, 0, 0).unwrap();
        let doc = MarkdownRenderer::new("https://cal.com").render_week(&schedule, &now);
        assert!(doc.contains("(/past/2025-W52.md)"));
        assert!(doc.contains("(/future/2026-W02.md)"));
    }

    #[test]
    fn tentative_slot_without_link_shows_label_only() {
        let start = Tz::UTC.with_ymd_and_hms(2025, 2, 18, 9, 0, 0).unwrap();
        let event = Event {
            start,
            end: start + Duration::minutes(30),
            status: EventStatus::Tentative,
            title: "Maybe lunch".to_string(),
            description: String::new(),
            location: "Cafeteria".to_string(),
        };
        let schedule = MergeEngine::new(Some(Tz::UTC)).merge_events(&[event], 2025, 8);
        let doc = MarkdownRenderer::new("https://cal.com").render_week(&schedule, &now());
        assert!(doc.contains("🟡 Meeting"));
        assert!(!doc.contains("Maybe lunch"));
    }
}
