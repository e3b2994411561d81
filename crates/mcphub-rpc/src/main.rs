//! mcphub HTTP API - read-only JSON endpoints over the local mirror.

mod handler;
mod server;

use anyhow::Result;
use clap::Parser;
use mcphub_core::config::StoreConfig;
use mcphub_core::HubStore;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mcphub-rpc")]
#[command(about = "Read-only HTTP API over the local mcphub mirror")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "7630")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Store directory (defaults to the per-user config dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let store = match args.data_dir {
        Some(dir) => HubStore::open_at(&dir.join(StoreConfig::DB_FILENAME))?,
        None => HubStore::open()?,
    };

    let addr = server::start_server(store, &args.host, args.port).await?;
    info!("mcphub API ready on http://{}", addr);

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}
