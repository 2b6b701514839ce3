//! Main entry point for the squad claim bot.

use anyhow::Result;
use clap::Parser;
use squadclaim_bot::{ClaimBot, WarnWriter};
use squadclaim_common::init_logging;
use squadclaim_config::ConfigLoader;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level, overrides the configured one
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => ConfigLoader::load_from_file(&path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_logging(config.logging.clone()).map_err(|e| anyhow::anyhow!(e))?;

    info!(
        command = %config.claim.command_prefix,
        debug = config.claim.debug,
        "Starting squad claim bot"
    );

    let transport = Arc::new(WarnWriter::new(tokio::io::stdout()));
    let bot = ClaimBot::new(config, transport);
    let input = BufReader::new(tokio::io::stdin());

    tokio::select! {
        result = bot.run(input) => {
            let lines = result?;
            info!(lines, "Input closed");
        }
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Received shutdown signal, starting graceful shutdown"),
                Err(e) => error!("Failed to listen for shutdown signal: {:?}", e),
            }
        }
    }

    bot.shutdown().await;
    info!("Squad claim bot has shut down");
    Ok(())
}
