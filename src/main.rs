//! GlowDesk - salon back office service

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use glowdesk::config::Config;
use glowdesk::server;
use glowdesk::storage::StorageLayer;
use glowdesk::utils::logging::init_tracing;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "glowdesk", version, about = "Salon back office service")]
struct Cli {
    /// YAML configuration file; defaults apply when it does not exist
    #[arg(short, long, default_value = "config/glowdesk.yaml")]
    config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Seed demo records into an empty database on startup
    #[arg(long)]
    seed_demo: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Seed demo records into an empty database and exit
    Seed,
    /// Print the effective configuration and exit
    CheckConfig,
}

async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = if Path::new(&cli.config).exists() {
        Config::from_file(&cli.config)
            .await
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        Config::default()
    };

    let mut config = config.with_env_overrides()?;
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.seed_demo {
        config.demo.seed_on_empty = true;
    }
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli).await?;
    init_tracing(&config.logging);
    if !Path::new(&cli.config).exists() {
        warn!(
            "{} not found, running with defaults and environment overrides",
            cli.config.display()
        );
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::run_server(config).await?,
        Command::Migrate => {
            let storage = StorageLayer::new(&config.storage).await?;
            storage.migrate().await?;
            storage.close().await?;
        }
        Command::Seed => {
            let storage = StorageLayer::new(&config.storage).await?;
            let report = storage.demo_fixture().seed_if_empty().await?;
            if report.is_empty() {
                info!("Database already holds records, nothing seeded");
            } else {
                info!("Seeded demo data: {:?}", report);
            }
            storage.close().await?;
        }
        Command::CheckConfig => print!("{}", config.to_yaml()?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
