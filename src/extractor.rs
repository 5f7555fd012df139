//! Line extractors for the three supported list dialects.
//!
//! Every extractor takes a single line and returns the set of lowercase
//! domain candidates it found. Lines that do not fit the expected grammar
//! contribute nothing; extraction never fails.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::validation::is_ipv4;

/// Loose domain-token grammar: label characters, a dot, an alphabetic suffix of 2+.
///
/// Spelled with explicit ASCII ranges instead of a case-insensitive flag so
/// Unicode case folding cannot pull in non-ASCII letters.
static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid domain regex"));

/// Identifier of the hosts-file source in the built-in registry
pub const HOSTS_FILE_SOURCE: &str = "ub_peter_lowe";

/// Identifier of the URL/host source in the built-in registry
pub const URL_HOST_SOURCE: &str = "ub_malicious_urlhaus";

/// Line grammar of a source, selecting the extractor applied to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFormat {
    /// Adblock filter syntax, scanned for domain-shaped substrings
    #[default]
    Generic,
    /// `<address> <hostname> [aliases...]`
    HostsFile,
    /// Bare hosts, bare IPs or full URLs, one per line
    UrlHost,
}

impl ListFormat {
    /// Static identifier -> format table. Unknown identifiers are generic.
    pub fn for_identifier(id: &str) -> Self {
        match id {
            HOSTS_FILE_SOURCE => ListFormat::HostsFile,
            URL_HOST_SOURCE => ListFormat::UrlHost,
            _ => ListFormat::Generic,
        }
    }

    /// Run this format's extractor over one line.
    pub fn extract(self, line: &str) -> HashSet<String> {
        match self {
            ListFormat::Generic => extract_generic(line),
            ListFormat::HostsFile => extract_hosts(line),
            ListFormat::UrlHost => extract_url_host(line),
        }
    }
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ListFormat::Generic => "generic",
            ListFormat::HostsFile => "hosts_file",
            ListFormat::UrlHost => "url_host",
        };
        f.write_str(s)
    }
}

/// Scan a filter line for every domain-shaped substring.
///
/// Syntax-blind on purpose: comments, exception rules and cosmetic filters
/// are scanned the same way as blocking rules.
pub fn extract_generic(line: &str) -> HashSet<String> {
    DOMAIN_RE
        .find_iter(line)
        .map(|m| m.as_str().to_lowercase())
        .filter(|d| !is_ipv4(d))
        .collect()
}

/// Take the final field of a hosts-file line.
pub fn extract_hosts(line: &str) -> HashSet<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return HashSet::new();
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return HashSet::new();
    }

    // Leading address and non-final aliases are dropped
    let host = fields[fields.len() - 1].trim().to_lowercase();
    singleton(host)
}

/// Extract the host of a bare host, bare IP or URL line.
pub fn extract_url_host(line: &str) -> HashSet<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('!') {
        return HashSet::new();
    }

    let host = if line.contains("://") {
        url_hostname(line).unwrap_or_default()
    } else {
        line.to_string()
    };

    let host = host.trim().to_lowercase();
    if host.is_empty() || is_ipv4(&host) {
        return HashSet::new();
    }

    // Scheme-less "host/path"
    let host = match host.split_once('/') {
        Some((head, _)) => head.to_string(),
        None => host,
    };

    singleton(host)
}

/// Raw hostname of a URL, without userinfo, port or IPv6 brackets.
///
/// The host text is taken as written: no numeric-host normalization, no port
/// validation and no IDNA mapping, so `is_ipv4` alone decides what is an
/// address. `None` if the line has no scheme, no authority or an empty host.
fn url_hostname(line: &str) -> Option<String> {
    let (scheme, rest) = line.split_once(':')?;
    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return None;
    }

    let rest = rest.strip_prefix("//")?;
    let authority = match rest.find(['/', '?', '#']) {
        Some(end) => &rest[..end],
        None => rest,
    };

    let host_port = match authority.rsplit_once('@') {
        Some((_, host_port)) => host_port,
        None => authority,
    };

    let host = match host_port.split_once('[') {
        Some((_, bracketed)) => bracketed.split(']').next().unwrap_or_default(),
        None => host_port.split(':').next().unwrap_or_default(),
    };

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn singleton(host: String) -> HashSet<String> {
    let mut out = HashSet::new();
    if !host.is_empty() && !is_ipv4(&host) {
        out.insert(host);
    }
    out
}
