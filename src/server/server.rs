mod server_config;
mod error;
mod routes;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use log::info;

use server_config::ServerConfig;
use tally::{Ledger, backend::JsonStore};

const SERVER_CONFIG: &str = "resources/server.toml";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Server configuration file
    #[arg(short, long, default_value = SERVER_CONFIG)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = ServerConfig::read_or_default(&args.config)?;
    let backend = JsonStore::new(&config.ledger.store_path);
    let ledger = Arc::new(Ledger::from_config(backend, &config.ledger));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("serving {} on {}", config.ledger.store_path.display(), config.bind_addr);

    axum::serve(listener, routes::build_router(ledger)).await?;
    Ok(())
}
