//! Centralized validation functions for sievelists.
//!
//! This module provides unified validation for:
//! - IPv4 literals (syntactic check used by every extractor)
//! - Source identifiers (they become output file names)
//! - Source URLs

use anyhow::{bail, Result};
use url::Url;

/// Syntactic IPv4 check: exactly four dot-separated decimal parts, each in 0..=255.
///
/// Never fails; malformed input is simply "not IPv4". IPv6 literals and
/// numeric-looking hosts such as `1.2.3` are not IPv4.
///
/// # Examples
/// ```
/// use sievelists::validation::is_ipv4;
/// assert!(is_ipv4("1.2.3.4"));
/// assert!(!is_ipv4("1.2.3.256"));
/// assert!(!is_ipv4("example.com"));
/// assert!(!is_ipv4("1.2.3"));
/// ```
pub fn is_ipv4(token: &str) -> bool {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 4 {
        return false;
    }

    parts.iter().all(|part| {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // Leading zeros are allowed; an all-zero part is 0
        let significant = part.trim_start_matches('0');
        significant.len() <= 3 && significant.parse::<u16>().map_or(true, |v| v <= 255)
    })
}

/// Validate a source identifier.
///
/// Identifiers name the output file, so only lowercase ASCII letters,
/// digits, `_` and `-` are accepted.
///
/// # Examples
/// ```
/// use sievelists::validation::validate_identifier;
/// assert!(validate_identifier("ub_easylist").is_ok());
/// assert!(validate_identifier("../etc").is_err());
/// assert!(validate_identifier("").is_err());
/// ```
pub fn validate_identifier(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("Source identifier cannot be empty");
    }

    if !id
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
    {
        bail!(
            "Invalid source identifier '{}'. Use lowercase letters, digits, '_' or '-'",
            id
        );
    }

    Ok(())
}

/// Validate a source URL: must parse and use `http` or `https`.
///
/// # Examples
/// ```
/// use sievelists::validation::validate_source_url;
/// assert!(validate_source_url("https://example.com/list.txt").is_ok());
/// assert!(validate_source_url("ftp://example.com/list.txt").is_err());
/// assert!(validate_source_url("not a url").is_err());
/// ```
pub fn validate_source_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| anyhow::anyhow!("Invalid URL '{}': {}", url, e))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => bail!("URL '{}' must use http or https (got '{}')", url, other),
    }
}
