//! HTTP fetcher for downloading source lists.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::error::SieveError;
use crate::utils::format_bytes;

#[cfg(test)]
use mockall::automock;

const TIMEOUT_SECS: u64 = 60;

/// Maximum size per list (64 MB)
/// The largest default list (EasyPrivacy) is a few MB
pub const MAX_LIST_SIZE: u64 = 64 * 1024 * 1024;

/// Source of list lines, keyed by URL.
///
/// The pipeline only depends on this trait, so tests can serve fixtures
/// without network access.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ListFetcher: Send + Sync {
    /// Retrieve the body at `url` and split it into lines.
    async fn fetch_lines(&self, url: &str) -> Result<Vec<String>, SieveError>;
}

/// HTTP client for fetching lists
pub struct HttpFetcher {
    client: Client,
    max_size: u64,
}

impl HttpFetcher {
    /// Create a new fetcher with default settings
    pub fn new() -> anyhow::Result<Self> {
        Self::with_limit(MAX_LIST_SIZE)
    }

    /// Create a fetcher with a custom per-list size limit
    pub fn with_limit(max_size: u64) -> anyhow::Result<Self> {
        use anyhow::Context;

        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("sievelists/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, max_size })
    }

    /// Fetch and decode the body, enforcing the status and size checks
    async fn fetch_text(&self, url: &str) -> Result<String, SieveError> {
        let transport = |source: reqwest::Error| SieveError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SieveError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        // Check Content-Length header if available
        if let Some(content_length) = response.content_length() {
            if content_length > self.max_size {
                return Err(SieveError::TooLarge {
                    url: url.to_string(),
                    size: content_length,
                    max: self.max_size,
                });
            }
        }

        let body = response.bytes().await.map_err(transport)?;

        // Double-check actual size after download
        if body.len() as u64 > self.max_size {
            return Err(SieveError::TooLarge {
                url: url.to_string(),
                size: body.len() as u64,
                max: self.max_size,
            });
        }

        debug!("Downloaded {} from {}", format_bytes(body.len() as u64), url);
        Ok(decode_lossy(&body))
    }
}

// Note: Default is intentionally not implemented for HttpFetcher
// because new() can fail and we want explicit error handling.

#[async_trait]
impl ListFetcher for HttpFetcher {
    async fn fetch_lines(&self, url: &str) -> Result<Vec<String>, SieveError> {
        let text = self.fetch_text(url).await?;
        Ok(split_lines(&text))
    }
}

/// Decode as UTF-8, dropping invalid byte sequences instead of failing
pub fn decode_lossy(body: &[u8]) -> String {
    body.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`.
///
/// A trailing terminator does not produce an extra empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = content
        .lines()
        .flat_map(|line| line.split('\r'))
        .map(str::to_string)
        .collect();
    if content.ends_with('\r') {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_unix() {
        assert_eq!(split_lines("a\nb\nc\n"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines_windows_and_mac() {
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_lines_keeps_inner_blank() {
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_lines_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_decode_lossy_invalid_bytes() {
        let body = b"ok.example.com\n\xff\xfebad\n";
        let lines = split_lines(&decode_lossy(body));
        assert_eq!(lines, vec!["ok.example.com", "bad"]);
    }

    #[test]
    fn test_decode_lossy_recovers_hostnames() {
        let hosts = decode_lossy(b"127.0.0.1 exa\xffmple.com");
        assert_eq!(hosts, "127.0.0.1 example.com");
        assert_eq!(
            crate::extractor::extract_hosts(&hosts),
            ["example.com".to_string()].into_iter().collect()
        );

        let filter = decode_lossy(b"||trk\xfe.example.org^");
        assert_eq!(
            crate::extractor::extract_generic(&filter),
            ["trk.example.org".to_string()].into_iter().collect()
        );
    }

    #[test]
    fn test_decode_lossy_truncated_sequence() {
        // Leading byte of a 3-byte sequence with only one continuation byte
        assert_eq!(decode_lossy(b"a\xe2\x82b.example.com"), "ab.example.com");
        assert_eq!(decode_lossy("caf\u{e9}.fr".as_bytes()), "caf\u{e9}.fr");
    }

    #[test]
    fn test_http_fetcher_new() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[tokio::test]
    async fn test_mock_fetcher() {
        let mut mock = MockListFetcher::new();
        mock.expect_fetch_lines()
            .times(1)
            .returning(|url| Ok(vec![url.to_string()]));

        let lines = mock.fetch_lines("https://example.com/list").await.unwrap();
        assert_eq!(lines, vec!["https://example.com/list"]);
    }
}
