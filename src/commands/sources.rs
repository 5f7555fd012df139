//! Sources command implementation.

use crate::config::Config;
use crate::output::output_path;

/// Print each configured source with its extractor and output file
pub fn run(config: &Config) {
    println!("Sources ({}):", config.sources.len());
    println!();
    for source in &config.sources {
        println!("  {:<24} {:<10} {}", source.id, source.format(), source.url);
        println!(
            "  {:<24} {:<10} -> {}",
            "",
            "",
            output_path(&config.output_dir, &source.id).display()
        );
    }
}
