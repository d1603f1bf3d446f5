//! Application configuration
//!
//! Configuration is environment-driven: the app binary loads `.env` (if
//! present) and then builds an [`AppConfig`] from process environment
//! variables. Only the git remote and the feed list are required; everything
//! else has a documented default.

use std::path::PathBuf;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BOOKING_URL, DEFAULT_BRANCH, DEFAULT_REPO_DIRECTORY, DEFAULT_SCHEDULE_MONTHS,
};
use crate::errors::{Result, SlotgridError};

/// Runtime configuration for a publish run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Git remote the generated schedule tree is pushed to.
    pub git_repo: String,
    /// Branch to commit on (default `main`).
    pub git_branch: String,
    /// ICS feed sources, URLs or local paths.
    pub ics_feeds: Vec<String>,
    /// Timezone all schedules are expressed in (default UTC).
    pub timezone: Tz,
    /// Local working copy of the schedule repository.
    pub repo_directory: PathBuf,
    /// How many months ahead to publish (default 3).
    pub schedule_months: u32,
    /// Booking link rendered next to available slots.
    pub booking_url: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Required variables: `GIT_REPO`, `ICS_FEEDS` (comma-separated).
    /// Optional: `GIT_BRANCH`, `TIMEZONE`, `REPO_DIRECTORY`,
    /// `SCHEDULE_MONTHS`, `BOOKING_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Split out from [`AppConfig::from_env`] so tests can supply variables
    /// without mutating process-wide environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let git_repo = lookup("GIT_REPO")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SlotgridError::Config("GIT_REPO is required".into()))?;

        let feeds_raw = lookup("ICS_FEEDS")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| SlotgridError::Config("ICS_FEEDS is required".into()))?;
        let ics_feeds: Vec<String> = feeds_raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if ics_feeds.is_empty() {
            return Err(SlotgridError::Config("ICS_FEEDS contains no usable entries".into()));
        }

        let timezone = match lookup("TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|_| {
                SlotgridError::Config(format!("TIMEZONE is not a valid IANA zone: {name}"))
            })?,
            None => Tz::UTC,
        };

        let schedule_months = match lookup("SCHEDULE_MONTHS") {
            Some(raw) => {
                let months: u32 = raw.trim().parse().map_err(|_| {
                    SlotgridError::Config(format!("SCHEDULE_MONTHS must be a number: {raw}"))
                })?;
                if months == 0 {
                    return Err(SlotgridError::Config("SCHEDULE_MONTHS must be >= 1".into()));
                }
                months
            }
            None => DEFAULT_SCHEDULE_MONTHS,
        };

        Ok(Self {
            git_repo,
            git_branch: lookup("GIT_BRANCH").unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            ics_feeds,
            timezone,
            repo_directory: lookup("REPO_DIRECTORY")
                .map_or_else(|| PathBuf::from(DEFAULT_REPO_DIRECTORY), PathBuf::from),
            schedule_months,
            booking_url: lookup("BOOKING_URL").unwrap_or_else(|| DEFAULT_BOOKING_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars(key: &str) -> Option<String> {
        match key {
            "GIT_REPO" => Some("git@example.com:me/schedule.git".to_string()),
            "ICS_FEEDS" => Some("https://example.com/a.ics, /data/b.ics".to_string()),
            _ => None,
        }
    }

    #[test]
    fn defaults_are_applied() {
        let config = AppConfig::from_lookup(base_vars).unwrap();
        assert_eq!(config.git_branch, "main");
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.schedule_months, 3);
        assert_eq!(config.repo_directory, PathBuf::from("./repo"));
        assert_eq!(config.ics_feeds.len(), 2);
        assert_eq!(config.ics_feeds[1], "/data/b.ics");
    }

    #[test]
    fn missing_required_variables_fail() {
        let err = AppConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, SlotgridError::Config(_)));

        let err = AppConfig::from_lookup(|key| {
            (key == "GIT_REPO").then(|| "repo".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, SlotgridError::Config(_)));
    }

    #[test]
    fn timezone_is_parsed() {
        let config = AppConfig::from_lookup(|key| match key {
            "TIMEZONE" => Some("America/New_York".to_string()),
            other => base_vars(other),
        })
        .unwrap();
        assert_eq!(config.timezone, Tz::America__New_York);
    }

    #[test]
    fn invalid_timezone_is_rejected() {
        let err = AppConfig::from_lookup(|key| match key {
            "TIMEZONE" => Some("Mars/Olympus_Mons".to_string()),
            other => base_vars(other),
        })
        .unwrap_err();
        assert!(matches!(err, SlotgridError::Config(_)));
    }

    #[test]
    fn zero_months_is_rejected() {
        let err = AppConfig::from_lookup(|key| match key {
            "SCHEDULE_MONTHS" => Some("0".to_string()),
            other => base_vars(other),
        })
        .unwrap_err();
        assert!(matches!(err, SlotgridError::Config(_)));
    }
}
