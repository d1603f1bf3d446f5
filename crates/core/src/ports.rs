//! Port interfaces for I/O collaborators
//!
//! The core never performs I/O itself; fetching, parsing, and publishing are
//! reached through these traits so the run loop can be exercised against
//! in-memory fakes.

use async_trait::async_trait;
use slotgrid_domain::{Event, Feed, Result};

/// Retrieves raw calendar bytes from a feed source.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the raw ICS document for `feed`.
    ///
    /// Failures are per-feed and recoverable; callers skip the feed and
    /// continue with the rest of the batch.
    async fn fetch(&self, feed: &Feed) -> Result<Vec<u8>>;
}

/// Parses raw ICS bytes into event records.
pub trait FeedParser: Send + Sync {
    fn parse(&self, data: &[u8]) -> Result<Vec<Event>>;
}

/// Persists rendered schedule documents to a version-controlled tree.
#[async_trait]
pub trait SchedulePublisher: Send + Sync {
    /// Make the working tree available (clone on first run, pull otherwise).
    async fn prepare(&self) -> Result<()>;

    /// Write one document at a repository-relative path.
    async fn write_file(&self, path: &str, content: &str) -> Result<()>;

    /// Commit staged changes. Returns `false` when there was nothing to
    /// commit.
    async fn commit(&self, message: &str) -> Result<bool>;

    /// Push committed changes to the remote.
    async fn push(&self) -> Result<()>;
}
