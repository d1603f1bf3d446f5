//! The batch publish run
//!
//! One run fetches every configured feed, merges the combined event list
//! into one schedule per planned week, renders and writes the documents,
//! and finishes with a single commit and push. A failing feed is skipped
//! with a warning; it never aborts the batch.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use slotgrid_core::{
    first_day_of_iso_week, past_friday_cutover, plan_weeks, week_of, FeedFetcher, FeedParser,
    MergeEngine, SchedulePublisher,
};
use slotgrid_domain::{AppConfig, Event, Feed, Result};
use slotgrid_infra::{FeedClient, GitRepository, IcsParser, MarkdownRenderer};
use tracing::{debug, info, warn};

/// Execute a publish run with the real adapters.
pub async fn run(config: &AppConfig) -> Result<()> {
    let fetcher = FeedClient::new()?;
    let parser = IcsParser::new(Some(config.timezone));
    let publisher = GitRepository::new(
        config.repo_directory.clone(),
        config.git_branch.clone(),
        config.git_repo.clone(),
    );

    let now = Utc::now().with_timezone(&config.timezone);
    run_with(config, &now, &fetcher, &parser, &publisher).await
}

/// Run-loop body, split out so tests can drive it with in-memory adapters
/// and a fixed clock.
pub(crate) async fn run_with(
    config: &AppConfig,
    now: &DateTime<Tz>,
    fetcher: &dyn FeedFetcher,
    parser: &dyn FeedParser,
    publisher: &dyn SchedulePublisher,
) -> Result<()> {
    publisher.prepare().await?;

    let events = collect_events(config, fetcher, parser).await;
    info!(events = events.len(), feeds = config.ics_feeds.len(), "collected feed events");

    let engine = MergeEngine::new(Some(config.timezone));
    let renderer = MarkdownRenderer::new(config.booking_url.clone());

    let mut updated: Vec<String> = Vec::new();
    for target in plan_weeks(now, config.schedule_months) {
        let schedule = engine.merge_events(&events, target.year, target.week);
        let content = renderer.render_week(&schedule, now);

        if target.is_current {
            if past_friday_cutover(now) {
                // Friday evening: the closing week is archived and the front
                // page flips to next week.
                let archive = format!("past/{}-W{:02}.md", target.year, target.week);
                publisher.write_file(&archive, &content).await?;
                updated.push(archive);

                let next_monday =
                    first_day_of_iso_week(target.year, target.week + 1, Some(config.timezone));
                let (next_year, next_week) = week_of(&next_monday);
                let next = engine.merge_events(&events, next_year, next_week);
                let next_content = renderer.render_week(&next, now);
                publisher.write_file("README.md", &next_content).await?;
                updated.push("README.md".to_string());
            } else {
                let path = target.document_path();
                publisher.write_file(&path, &content).await?;
                updated.push(path);
                publisher.write_file("README.md", &content).await?;
                updated.push("README.md".to_string());
            }
        } else {
            let path = target.document_path();
            publisher.write_file(&path, &content).await?;
            updated.push(path);
        }
    }

    let message = format!("Update schedules: {}", updated.join(", "));
    if publisher.commit(&message).await? {
        publisher.push().await?;
    }

    Ok(())
}

/// Fetch and parse every configured feed, skipping failures.
async fn collect_events(
    config: &AppConfig,
    fetcher: &dyn FeedFetcher,
    parser: &dyn FeedParser,
) -> Vec<Event> {
    let mut all = Vec::new();

    for (index, source) in config.ics_feeds.iter().enumerate() {
        // Feed ids are positional; sources may carry private tokens and are
        // kept out of the logs.
        let feed = Feed::new(format!("feed-{index}"), source.clone());

        let data = match fetcher.fetch(&feed).await {
            Ok(data) => data,
            Err(err) => {
                warn!(feed = %feed.id, error = %err, "skipping feed: fetch failed");
                continue;
            }
        };

        match parser.parse(&data) {
            Ok(mut events) => {
                debug!(feed = %feed.id, count = events.len(), "parsed feed");
                all.append(&mut events);
            }
            Err(err) => warn!(feed = %feed.id, error = %err, "skipping feed: parse failed"),
        }
    }

    all
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use slotgrid_domain::SlotgridError;

    use super::*;

    const GOOD_FEED: &str = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\n\
        BEGIN:VEVENT\r\n\
        DTSTART:20250217T100000Z\r\n\
        DTEND:20250217T110000Z\r\n\
        SUMMARY:Planning\r\n\
        STATUS:BUSY\r\n\
        END:VEVENT\r\n\
        END:VCALENDAR\r\n";

    struct FakeFetcher;

    #[async_trait]
    impl FeedFetcher for FakeFetcher {
        async fn fetch(&self, feed: &Feed) -> Result<Vec<u8>> {
            if feed.source.contains("unreachable") {
                Err(SlotgridError::Network("connection refused".into()))
            } else {
                Ok(GOOD_FEED.as_bytes().to_vec())
            }
        }
    }

    #[derive(Default)]
    struct MemoryPublisher {
        files: Mutex<HashMap<String, String>>,
        commits: Mutex<Vec<String>>,
        pushed: AtomicBool,
    }

    #[async_trait]
    impl SchedulePublisher for MemoryPublisher {
        async fn prepare(&self) -> Result<()> {
            Ok(())
        }

        async fn write_file(&self, path: &str, content: &str) -> Result<()> {
            self.files.lock().unwrap().insert(path.to_string(), content.to_string());
            Ok(())
        }

        async fn commit(&self, message: &str) -> Result<bool> {
            self.commits.lock().unwrap().push(message.to_string());
            Ok(true)
        }

        async fn push(&self) -> Result<()> {
            self.pushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    fn config() -> AppConfig {
        AppConfig::from_lookup(|key| match key {
            "GIT_REPO" => Some("git@example.com:me/schedule.git".to_string()),
            "ICS_FEEDS" => {
                Some("https://feeds.example.com/a.ics,https://unreachable.example.com/b.ics".to_string())
            }
            "SCHEDULE_MONTHS" => Some("1".to_string()),
            _ => None,
        })
        .unwrap()
    }

    fn midweek_now() -> DateTime<Tz> {
        // Wednesday of 2025-W08.
        Tz::UTC.with_ymd_and_hms(2025, 2, 19, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn publishes_window_and_front_page() {
        let publisher = MemoryPublisher::default();
        let config = config();
        let parser = IcsParser::new(Some(config.timezone));

        run_with(&config, &midweek_now(), &FakeFetcher, &parser, &publisher).await.unwrap();

        let files = publisher.files.lock().unwrap();
        assert!(files.contains_key("README.md"));
        assert!(files.contains_key("future/2025-W08.md"));
        assert!(files.contains_key("past/2025-W07.md"));

        // The busy Monday event from the good feed shows on the front page
        // even though the second feed failed.
        let front = &files["README.md"];
        assert!(front.contains("(Week 8)"));
        assert!(front.contains("🔴 Meeting"));

        let commits = publisher.commits.lock().unwrap();
        assert_eq!(commits.len(), 1);
        assert!(commits[0].starts_with("Update schedules: "));
        assert!(commits[0].contains("README.md"));
        assert!(publisher.pushed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn friday_evening_flips_the_front_page() {
        let publisher = MemoryPublisher::default();
        let config = config();
        let parser = IcsParser::new(Some(config.timezone));

        // Friday of 2025-W08, 19:00.
        let now = Tz::UTC.with_ymd_and_hms(2025, 2, 21, 19, 0, 0).unwrap();
        run_with(&config, &now, &FakeFetcher, &parser, &publisher).await.unwrap();

        let files = publisher.files.lock().unwrap();
        // Closing week archived, front page shows next week.
        assert!(files.contains_key("past/2025-W08.md"));
        assert!(files["README.md"].contains("(Week 9)"));
    }

    #[tokio::test]
    async fn all_feeds_failing_still_publishes_an_open_schedule() {
        struct DownFetcher;

        #[async_trait]
        impl FeedFetcher for DownFetcher {
            async fn fetch(&self, _feed: &Feed) -> Result<Vec<u8>> {
                Err(SlotgridError::Network("offline".into()))
            }
        }

        let publisher = MemoryPublisher::default();
        let config = config();
        let parser = IcsParser::new(Some(config.timezone));

        run_with(&config, &midweek_now(), &DownFetcher, &parser, &publisher).await.unwrap();

        let files = publisher.files.lock().unwrap();
        let front = &files["README.md"];
        assert!(front.contains("🟢 [Available]"));
        assert!(!front.contains("🔴"));
    }
}
