//! Feed retrieval
//!
//! Fetches raw ICS documents from URLs or local paths. Remote fetches retry
//! transient failures (5xx, timeouts, connection errors) with exponential
//! backoff; anything else surfaces as a per-feed error the run loop skips.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use slotgrid_core::FeedFetcher;
use slotgrid_domain::constants::{FETCH_BASE_BACKOFF_MS, FETCH_MAX_ATTEMPTS, FETCH_TIMEOUT_SECS};
use slotgrid_domain::{Feed, Result, SlotgridError};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP/file feed fetcher with built-in retry and timeout support.
#[derive(Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    max_attempts: usize,
    base_backoff: Duration,
}

impl FeedClient {
    /// Build a client with the default timeout and retry policy.
    pub fn new() -> Result<Self> {
        Self::with_policy(FETCH_MAX_ATTEMPTS, Duration::from_millis(FETCH_BASE_BACKOFF_MS))
    }

    /// Build a client with an explicit retry policy.
    pub fn with_policy(max_attempts: usize, base_backoff: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|err| SlotgridError::Internal(format!("failed to build http client: {err}")))?;
        Ok(Self { client, max_attempts: max_attempts.max(1), base_backoff })
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        for attempt in 1..=self.max_attempts {
            debug!(attempt, url, "fetching feed");

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, url, %status, "received feed response");

                    if status.is_success() {
                        let bytes = response.bytes().await.map_err(InfraError::from)?;
                        return Ok(bytes.to_vec());
                    }

                    if status.is_server_error() && attempt < self.max_attempts {
                        self.sleep_with_backoff(attempt).await;
                        continue;
                    }

                    return Err(SlotgridError::Network(format!(
                        "unexpected status {status} fetching {url}"
                    )));
                }
                Err(err) => {
                    debug!(attempt, url, error = %err, "feed request failed");

                    if attempt < self.max_attempts && (err.is_timeout() || err.is_connect()) {
                        self.sleep_with_backoff(attempt).await;
                        continue;
                    }

                    return Err(InfraError::from(err).into());
                }
            }
        }

        Err(SlotgridError::Internal("feed client exhausted retries".into()))
    }

    async fn fetch_file(&self, path: &str) -> Result<Vec<u8>> {
        if !Path::new(path).exists() {
            return Err(SlotgridError::Io(format!("feed file does not exist: {path}")));
        }
        tokio::fs::read(path).await.map_err(|err| InfraError::from(err).into())
    }

    async fn sleep_with_backoff(&self, attempt: usize) {
        let shift = attempt.saturating_sub(1).min(8) as u32;
        let delay = self.base_backoff.saturating_mul(1 << shift);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl FeedFetcher for FeedClient {
    async fn fetch(&self, feed: &Feed) -> Result<Vec<u8>> {
        if feed.is_url {
            self.fetch_url(&feed.source).await
        } else {
            self.fetch_file(&feed.source).await
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const SAMPLE: &str = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";

    fn client() -> FeedClient {
        FeedClient::with_policy(3, Duration::from_millis(1)).unwrap()
    }

    #[tokio::test]
    async fn fetches_a_remote_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cal.ics"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
            .mount(&server)
            .await;

        let feed = Feed::new("remote", format!("{}/cal.ics", server.uri()));
        let bytes = client().fetch(&feed).await.unwrap();
        assert_eq!(bytes, SAMPLE.as_bytes());
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cal.ics"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cal.ics"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE))
            .mount(&server)
            .await;

        let feed = Feed::new("flaky", format!("{}/cal.ics", server.uri()));
        let bytes = client().fetch(&feed).await.unwrap();
        assert_eq!(bytes, SAMPLE.as_bytes());
    }

    #[tokio::test]
    async fn client_errors_do_not_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cal.ics"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let feed = Feed::new("gone", format!("{}/cal.ics", server.uri()));
        let err = client().fetch(&feed).await.unwrap_err();
        assert!(matches!(err, SlotgridError::Network(_)));
    }

    #[tokio::test]
    async fn reads_a_local_feed_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("local.ics");
        std::fs::write(&file, SAMPLE).unwrap();

        let feed = Feed::new("local", file.to_string_lossy());
        let bytes = client().fetch(&feed).await.unwrap();
        assert_eq!(bytes, SAMPLE.as_bytes());
    }

    #[tokio::test]
    async fn missing_local_feed_is_an_io_error() {
        let feed = Feed::new("missing", "/nonexistent/feed.ics");
        let err = client().fetch(&feed).await.unwrap_err();
        assert!(matches!(err, SlotgridError::Io(_)));
    }
}
