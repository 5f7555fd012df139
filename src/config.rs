//! Configuration management for sievelists.
//!
//! The built-in source table is the default configuration. An optional YAML
//! file can replace the source list or the output directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::SieveError;
use crate::extractor::ListFormat;
use crate::validation::{validate_identifier, validate_source_url};

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "BlockLists";

/// Built-in registry: identifier and URL, in processing order
const DEFAULT_SOURCES: &[(&str, &str)] = &[
    (
        "ub_easylist",
        "https://raw.githubusercontent.com/easylist/easylist/gh-pages/easylist.txt",
    ),
    (
        "ub_easyprivacy",
        "https://raw.githubusercontent.com/easylist/easylist/gh-pages/easyprivacy.txt",
    ),
    (
        "ub_ublock_ads",
        "https://raw.githubusercontent.com/uBlockOrigin/uAssets/master/filters/filters.txt",
    ),
    (
        "ub_ublock_privacy",
        "https://raw.githubusercontent.com/uBlockOrigin/uAssets/master/filters/privacy.txt",
    ),
    (
        "ub_peter_lowe",
        "https://pgl.yoyo.org/adservers/serverlist.php?hostformat=hosts&showintro=0&mimetype=plaintext",
    ),
    (
        "ub_malicious_urlhaus",
        "https://malware-filter.gitlab.io/malware-filter/urlhaus-filter-online.txt",
    ),
];

/// A single list to download and convert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    /// Short stable key; also names the output file
    pub id: String,
    pub url: String,
    /// Explicit line grammar; derived from `id` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ListFormat>,
}

impl SourceDescriptor {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            format: None,
        }
    }

    /// Extractor to use for this source
    pub fn format(&self) -> ListFormat {
        self.format
            .unwrap_or_else(|| ListFormat::for_identifier(&self.id))
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory receiving one `<id>.txt` per source
    pub output_dir: PathBuf,

    /// Sources, processed in this order
    pub sources: Vec<SourceDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            sources: default_sources(),
        }
    }
}

impl Config {
    /// Build a config from an explicit source list
    pub fn with_sources(output_dir: impl Into<PathBuf>, sources: Vec<SourceDescriptor>) -> Self {
        Self {
            output_dir: output_dir.into(),
            sources,
        }
    }

    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), SieveError> {
        if self.sources.is_empty() {
            return Err(SieveError::Config("No sources configured".to_string()));
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            validate_identifier(&source.id).map_err(|e| SieveError::Config(e.to_string()))?;
            validate_source_url(&source.url).map_err(|e| {
                SieveError::Config(format!("Source '{}' has an invalid URL: {}", source.id, e))
            })?;

            if !seen.insert(source.id.as_str()) {
                return Err(SieveError::Config(format!(
                    "Duplicate source identifier '{}'",
                    source.id
                )));
            }
        }

        Ok(())
    }

    /// Restrict to the given identifiers, keeping registry order.
    ///
    /// An empty selection keeps every source.
    pub fn select(&self, ids: &[String]) -> Result<Config, SieveError> {
        if ids.is_empty() {
            return Ok(self.clone());
        }

        for id in ids {
            if !self.sources.iter().any(|s| &s.id == id) {
                return Err(SieveError::Config(format!(
                    "Unknown source '{}'. Available: {}",
                    id,
                    self.source_ids().join(", ")
                )));
            }
        }

        let sources = self
            .sources
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect();

        Ok(Config {
            output_dir: self.output_dir.clone(),
            sources,
        })
    }

    /// Identifiers of all configured sources, in order
    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id.as_str()).collect()
    }
}

/// The six built-in sources
pub fn default_sources() -> Vec<SourceDescriptor> {
    DEFAULT_SOURCES
        .iter()
        .map(|(id, url)| SourceDescriptor::new(*id, *url))
        .collect()
}
