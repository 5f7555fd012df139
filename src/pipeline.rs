//! Per-source fetch, extract, dedupe, sort and write.
//!
//! Sources are processed one at a time in configuration order. Each source's
//! lines and domain set are dropped once its file is written, so nothing is
//! shared between sources.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{Config, SourceDescriptor};
use crate::extractor::ListFormat;
use crate::fetcher::ListFetcher;
use crate::output::{output_path, write_domain_list};
use crate::utils::format_count;

/// Outcome of processing one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub id: String,
    pub url: String,
    pub format: ListFormat,
    pub line_count: usize,
    pub domain_count: usize,
    pub path: PathBuf,
}

/// Apply `format`'s extractor to every line and union the results.
///
/// The returned set is already in ascending order.
pub fn extract_domains<I, S>(format: ListFormat, lines: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut domains = BTreeSet::new();
    for line in lines {
        domains.extend(format.extract(line.as_ref()));
    }
    domains
}

/// Fetch one source, extract its domains and write `<id>.txt`.
///
/// A fetch error is returned before anything is written for this source.
pub async fn process_source<F>(
    fetcher: &F,
    source: &SourceDescriptor,
    output_dir: &Path,
) -> Result<SourceReport>
where
    F: ListFetcher + ?Sized,
{
    let format = source.format();
    info!("Fetching {} from {}...", source.id, source.url);

    let lines = fetcher
        .fetch_lines(&source.url)
        .await
        .with_context(|| format!("Failed to fetch {}", source.id))?;
    let line_count = lines.len();

    let domains = extract_domains(format, &lines);
    drop(lines);
    debug!(
        "{}: {} lines -> {} domains ({} extractor)",
        source.id,
        format_count(line_count),
        format_count(domains.len()),
        format
    );

    let path = output_path(output_dir, &source.id);
    write_domain_list(&path, &domains)
        .with_context(|| format!("Failed to write list for {}", source.id))?;

    info!("Wrote {} domains to {}", domains.len(), path.display());

    Ok(SourceReport {
        id: source.id.clone(),
        url: source.url.clone(),
        format,
        line_count,
        domain_count: domains.len(),
        path,
    })
}

/// Process every configured source in order.
///
/// Stops at the first error; lists written for earlier sources stay on disk.
pub async fn run<F>(config: &Config, fetcher: &F) -> Result<Vec<SourceReport>>
where
    F: ListFetcher + ?Sized,
{
    let mut reports = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let report = process_source(fetcher, source, &config.output_dir).await?;
        reports.push(report);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SieveError;
    use crate::fetcher::MockListFetcher;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_domains_dedup_and_sort() {
        let input = [
            "127.0.0.1 b.example.com",
            "127.0.0.1 a.example.com",
            "127.0.0.1 a.example.com",
            "# skip",
        ];
        let domains = extract_domains(ListFormat::HostsFile, input);
        let got: Vec<&str> = domains.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["a.example.com", "b.example.com"]);
    }

    #[test]
    fn test_extract_domains_generic_union() {
        let input = ["||ads.example.com^", "example.org##.ad", "! ads.example.com"];
        let domains = extract_domains(ListFormat::Generic, input);
        assert_eq!(domains.len(), 2);
        assert!(domains.contains("example.org"));
    }

    #[tokio::test]
    async fn test_process_source_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut fetcher = MockListFetcher::new();
        fetcher
            .expect_fetch_lines()
            .times(1)
            .returning(|_| Ok(lines(&["127.0.0.1 a.example.com", "127.0.0.1 a.example.com", "# skip"])));

        let source = SourceDescriptor::new("ub_peter_lowe", "https://example.com/hosts");
        let report = process_source(&fetcher, &source, temp_dir.path())
            .await
            .unwrap();

        assert_eq!(report.format, ListFormat::HostsFile);
        assert_eq!(report.line_count, 3);
        assert_eq!(report.domain_count, 1);
        let content = std::fs::read_to_string(&report.path).unwrap();
        assert_eq!(content, "a.example.com\n");
    }

    #[tokio::test]
    async fn test_run_selects_extractor_per_source() {
        let temp_dir = TempDir::new().unwrap();
        let mut fetcher = MockListFetcher::new();
        fetcher.expect_fetch_lines().returning(|url| {
            Ok(match url {
                "https://example.com/filters" => lines(&["||ads.example.com^", "! c"]),
                "https://example.com/hosts" => lines(&["0.0.0.0 x.example.com y.example.com"]),
                _ => lines(&["http://evil.example.org/p", "203.0.113.5"]),
            })
        });

        let config = Config::with_sources(
            temp_dir.path(),
            vec![
                SourceDescriptor::new("filters", "https://example.com/filters"),
                SourceDescriptor::new("ub_peter_lowe", "https://example.com/hosts"),
                SourceDescriptor::new("ub_malicious_urlhaus", "https://example.com/urlhaus"),
            ],
        );

        let reports = run(&config, &fetcher).await.unwrap();
        let ids: Vec<&str> = reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["filters", "ub_peter_lowe", "ub_malicious_urlhaus"]);

        let read = |id: &str| std::fs::read_to_string(temp_dir.path().join(format!("{}.txt", id))).unwrap();
        assert_eq!(read("filters"), "ads.example.com\n");
        assert_eq!(read("ub_peter_lowe"), "y.example.com\n");
        assert_eq!(read("ub_malicious_urlhaus"), "evil.example.org\n");
    }

    #[tokio::test]
    async fn test_run_fetch_error_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let mut fetcher = MockListFetcher::new();
        fetcher.expect_fetch_lines().returning(|url| {
            if url.ends_with("/broken") {
                Err(SieveError::HttpStatus {
                    url: url.to_string(),
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                })
            } else {
                Ok(lines(&["a.example.com"]))
            }
        });

        let config = Config::with_sources(
            temp_dir.path(),
            vec![
                SourceDescriptor::new("first", "https://example.com/ok"),
                SourceDescriptor::new("second", "https://example.com/broken"),
                SourceDescriptor::new("third", "https://example.com/ok"),
            ],
        );

        let err = run(&config, &fetcher).await.unwrap_err();
        let sieve_err = err.downcast_ref::<SieveError>().unwrap();
        assert!(sieve_err.is_fetch_error());

        assert!(temp_dir.path().join("first.txt").exists());
        assert!(!temp_dir.path().join("second.txt").exists());
        assert!(!temp_dir.path().join("third.txt").exists());
    }

    #[tokio::test]
    async fn test_run_empty_source_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut fetcher = MockListFetcher::new();
        fetcher
            .expect_fetch_lines()
            .returning(|_| Ok(lines(&["! only comments", ""])));

        let config = Config::with_sources(
            temp_dir.path(),
            vec![SourceDescriptor::new("ub_malicious_urlhaus", "https://example.com/u")],
        );
        let reports = run(&config, &fetcher).await.unwrap();
        assert_eq!(reports[0].domain_count, 0);
        assert_eq!(std::fs::read_to_string(&reports[0].path).unwrap(), "");
    }
}
