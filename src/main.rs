//! sievelists - domain-only block lists from public filter lists

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use sievelists::cli::{Cli, Commands};
use sievelists::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Commands::Version = cli.command {
        println!("sievelists {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = commands::load_config(cli.config.as_deref(), cli.output_dir.as_deref())?;

    match cli.command {
        Commands::Update { only } => commands::update::run(&config, &only).await,
        Commands::Sources => {
            commands::sources::run(&config);
            Ok(())
        }
        Commands::Verify => commands::verify::run(&config),
        Commands::Version => Ok(()),
    }
}
