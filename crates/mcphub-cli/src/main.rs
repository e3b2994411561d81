//! mcphub CLI - register remote registries, synchronize their catalogs,
//! and inspect the local mirror.

mod table;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use mcphub_core::config::StoreConfig;
use mcphub_core::{
    register_registry, EntryKind, HubError, HubStore, RegistryClient, Synchronizer, SyncSummary,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "mcphub")]
#[command(about = "Mirror MCP server and skill registries locally", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Store directory (defaults to the per-user config dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage registered registries
    Registry {
        #[command(subcommand)]
        command: RegistryCommand,
    },
    /// Synchronize one registry, or all of them
    Sync {
        /// Registry name (all registries when omitted)
        name: Option<String>,
    },
    /// List mirrored server entries
    Servers {
        /// Only entries from this registry
        #[arg(long)]
        registry: Option<String>,
    },
    /// List mirrored skill entries
    Skills {
        /// Only entries from this registry
        #[arg(long)]
        registry: Option<String>,
    },
    /// List installation records
    Installations,
}

#[derive(Subcommand, Debug)]
enum RegistryCommand {
    /// Register a remote registry
    Add {
        name: String,
        url: String,
        /// Registry visibility: public or private
        #[arg(long, default_value = "public")]
        kind: String,
    },
    /// List registered registries
    List,
    /// Remove a registry and its mirrored entries
    Remove { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let store = match &cli.data_dir {
        Some(dir) => HubStore::open_at(&dir.join(StoreConfig::DB_FILENAME))?,
        None => HubStore::open()?,
    };

    match cli.command {
        Command::Registry { command } => run_registry(&store, command),
        Command::Sync { name } => run_sync(&store, name.as_deref()).await,
        Command::Servers { registry } => {
            list_entries(&store, EntryKind::Server, registry.as_deref())
        }
        Command::Skills { registry } => list_entries(&store, EntryKind::Skill, registry.as_deref()),
        Command::Installations => list_installations(&store),
    }
}

fn run_registry(store: &HubStore, command: RegistryCommand) -> Result<()> {
    match command {
        RegistryCommand::Add { name, url, kind } => {
            let registry = register_registry(store, &name, &url, &kind)?;
            println!("Added {} registry '{}'", registry.kind, registry.name);
            Ok(())
        }
        RegistryCommand::List => {
            let registries = store.list_registries()?;
            if registries.is_empty() {
                println!("No registries registered");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = registries
                .into_iter()
                .map(|r| vec![r.name, r.kind.to_string(), r.url, r.created_at])
                .collect();
            print!("{}", table::render(&["NAME", "KIND", "URL", "CREATED"], &rows));
            Ok(())
        }
        RegistryCommand::Remove { name } => {
            if store.delete_registry(&name)? {
                println!("Removed registry '{}'", name);
                Ok(())
            } else {
                bail!("registry '{}' not found", name)
            }
        }
    }
}

async fn run_sync(store: &HubStore, name: Option<&str>) -> Result<()> {
    let client = RegistryClient::new()?;
    let synchronizer = Synchronizer::new(store, &client);

    let summary = match name {
        Some(name) => {
            let Some(registry) = store.get_registry(name)? else {
                return Err(HubError::RegistryNotFound {
                    name: name.to_string(),
                }
                .into());
            };
            SyncSummary {
                outcomes: vec![synchronizer.sync_registry(&registry).await],
            }
        }
        None => synchronizer.sync_all().await?,
    };

    if summary.outcomes.is_empty() {
        println!("No registries to synchronize");
        return Ok(());
    }

    for outcome in &summary.outcomes {
        match &outcome.error {
            Some(error) => println!("{}: FAILED ({})", outcome.registry, error),
            None => {
                let mut line = format!(
                    "{}: {} entries stored ({} fetched",
                    outcome.registry, outcome.stored, outcome.fetched
                );
                if outcome.failed_entries > 0 {
                    line.push_str(&format!(", {} skipped", outcome.failed_entries));
                }
                line.push(')');
                println!("{}", line);
            }
        }
    }
    println!(
        "Total: {} entries stored, {} of {} registries failed",
        summary.total_stored(),
        summary.failed_registries(),
        summary.outcomes.len()
    );
    Ok(())
}

fn list_entries(store: &HubStore, kind: EntryKind, registry: Option<&str>) -> Result<()> {
    let registry_id = match registry {
        Some(name) => {
            let Some(registry) = store.get_registry(name)? else {
                return Err(HubError::RegistryNotFound {
                    name: name.to_string(),
                }
                .into());
            };
            Some(registry.id)
        }
        None => None,
    };

    let entries = store.list_entries(kind, registry_id.as_deref())?;
    if entries.is_empty() {
        println!("No {} entries mirrored", kind.label());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = entries
        .into_iter()
        .map(|e| {
            vec![
                e.name,
                e.version,
                if e.installed { "yes".to_string() } else { String::new() },
                table::truncate(&e.description, 60),
            ]
        })
        .collect();
    print!(
        "{}",
        table::render(&["NAME", "VERSION", "INSTALLED", "DESCRIPTION"], &rows)
    );
    Ok(())
}

fn list_installations(store: &HubStore) -> Result<()> {
    let installations = store.list_installations()?;
    if installations.is_empty() {
        println!("No installations recorded");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = installations
        .into_iter()
        .map(|i| vec![i.resource_type, i.resource_name, i.version, i.created_at])
        .collect();
    print!(
        "{}",
        table::render(&["TYPE", "NAME", "VERSION", "INSTALLED AT"], &rows)
    );
    Ok(())
}
