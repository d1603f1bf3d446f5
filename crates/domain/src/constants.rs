//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Business-hours grid shape
pub const BUSINESS_DAY_START_HOUR: u32 = 9;
pub const SLOT_MINUTES: i64 = 30;
pub const SLOTS_PER_DAY: usize = 16;
pub const WEEKDAYS_PER_WEEK: usize = 5;

// Feed fetching
pub const FETCH_TIMEOUT_SECS: u64 = 30;
pub const FETCH_MAX_ATTEMPTS: usize = 3;
pub const FETCH_BASE_BACKOFF_MS: u64 = 200;

// Publishing defaults
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_REPO_DIRECTORY: &str = "./repo";
pub const DEFAULT_SCHEDULE_MONTHS: u32 = 3;
pub const DEFAULT_BOOKING_URL: &str = "https://cal.com";

// Anonymized rendering
pub const ANONYMIZED_TITLE: &str = "Meeting";
pub const ANONYMIZED_MEETING_LINK: &str = "https://meet.xyz";
