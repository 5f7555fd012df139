//! Update command implementation.

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::fetcher::HttpFetcher;
use crate::pipeline;
use crate::utils::format_count;

/// Run the update command
pub async fn run(config: &Config, only: &[String]) -> Result<()> {
    let config = config.select(only)?;

    info!(
        "Updating {} lists into {}",
        config.sources.len(),
        config.output_dir.display()
    );

    let fetcher = HttpFetcher::new()?;
    let reports = pipeline::run(&config, &fetcher).await?;

    for report in reports.iter().filter(|r| r.domain_count == 0) {
        warn!("{} produced no domains", report.id);
    }

    let total: usize = reports.iter().map(|r| r.domain_count).sum();

    println!();
    for report in &reports {
        println!(
            "  {:<24} {:>8} domains  -> {}",
            report.id,
            format_count(report.domain_count),
            report.path.display()
        );
    }
    println!();
    println!(
        "[OK] {} lists written ({} domains)",
        reports.len(),
        format_count(total)
    );

    Ok(())
}
