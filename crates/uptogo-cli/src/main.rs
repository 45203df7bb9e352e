mod commands;
mod order_file;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "uptogo-cli")]
#[command(about = "Uptogo delivery quoting and order actions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the store behind an API key and print the settings to keep
    Settings {
        #[arg(long)]
        api_key: String,
    },
    /// Quote shipping for the package in an order file
    Quote {
        /// Order file (JSON)
        #[arg(long)]
        order: PathBuf,
        /// Store the offer at this position (0-based) as the customer's choice
        #[arg(long)]
        select: Option<usize>,
    },
    /// Request a delivery for the order's selected rate
    Deliver {
        #[arg(long)]
        order: PathBuf,
    },
    /// Cancel the order's active delivery
    Cancel {
        #[arg(long)]
        order: PathBuf,
    },
    /// Show which delivery action the order currently offers
    Actions {
        #[arg(long)]
        order: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = uptogo_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Settings { api_key }) => commands::run_settings(&config, &api_key).await?,
        Some(Commands::Quote { order, select }) => {
            commands::run_quote(&config, &order, select).await?;
        }
        Some(Commands::Deliver { order }) => commands::run_deliver(&config, &order).await?,
        Some(Commands::Cancel { order }) => commands::run_cancel(&config, &order).await?,
        Some(Commands::Actions { order }) => commands::run_actions(&order).await?,
        None => println!("no command given; see --help"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
