//! Reading and writing generated domain lists.
//!
//! A list file holds one lowercase domain per line, sorted ascending and
//! newline-terminated, with no header or comments.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::SieveError;

/// Path of the list for `id` under `dir`
pub fn output_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.txt", id))
}

/// Render domains as newline-terminated lines, in iteration order
pub fn render_domain_list<'a, I>(domains: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out = String::new();
    for domain in domains {
        out.push_str(domain);
        out.push('\n');
    }
    out
}

/// Write a domain set to `path`, replacing any previous content.
///
/// Uses tempfile + rename so a crash never leaves a half-written list.
pub fn write_domain_list(path: &Path, domains: &BTreeSet<String>) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", parent_dir))?;

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", parent_dir))?;

    temp_file.write_all(render_domain_list(domains).as_bytes())?;
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist domain list: {:?}", path))?;

    Ok(())
}

/// Load a list the way consumers do: trimmed, lowercased, skipping blank and `#` lines.
pub fn read_domain_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read domain list: {:?}", path))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_lowercase)
        .collect())
}

/// Check a generated list file and return its entry count.
///
/// Fails on blank lines, a missing final newline, or entries that are not
/// strictly ascending.
pub fn verify_domain_list(path: &Path) -> Result<usize, SieveError> {
    let invalid = |reason: String| SieveError::InvalidList {
        path: path.to_path_buf(),
        reason,
    };

    let content = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    if content.is_empty() {
        return Ok(0);
    }
    if !content.ends_with('\n') {
        return Err(invalid("missing trailing newline".to_string()));
    }

    let mut previous: Option<&str> = None;
    let mut count = 0;
    for (idx, line) in content.lines().enumerate() {
        if line.is_empty() {
            return Err(invalid(format!("blank line at line {}", idx + 1)));
        }
        if let Some(prev) = previous {
            if prev >= line {
                return Err(invalid(format!(
                    "'{}' at line {} is not after '{}'",
                    line,
                    idx + 1,
                    prev
                )));
            }
        }
        previous = Some(line);
        count += 1;
    }

    Ok(count)
}
