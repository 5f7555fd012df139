//! Verify command implementation.

use anyhow::Result;
use tracing::error;

use crate::config::Config;
use crate::output::{output_path, verify_domain_list};
use crate::utils::format_count;

/// Check every configured source's output file
pub fn run(config: &Config) -> Result<()> {
    let mut failures = 0;

    for source in &config.sources {
        let path = output_path(&config.output_dir, &source.id);
        match verify_domain_list(&path) {
            Ok(count) => println!("  [OK]   {:<24} {:>8} domains", source.id, format_count(count)),
            Err(e) => {
                println!("  [FAIL] {:<24} {}", source.id, path.display());
                error!("{}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} lists failed verification", failures, config.sources.len());
    }

    Ok(())
}
