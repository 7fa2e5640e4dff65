// SPDX-License-Identifier: GPL-3.0-only

//! COSMIC Ext Storage Monitor - inspect and watch the UDisks2 object registry

use anyhow::{Context, Result};
use clap::Parser;
use storage_udisks::{Connection, RegistryHandle, RegistryMonitor};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

mod cli;
mod config;
mod logging;
mod output;

use cli::{Cli, Command};
use config::{BusKind, Config};
use output::RootEntry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    logging::init(&config);

    info!(
        "Starting COSMIC Ext Storage Monitor v{}",
        env!("CARGO_PKG_VERSION")
    );

    let connection = match config.bus {
        BusKind::System => Connection::system().await,
        BusKind::Session => Connection::session().await,
    }
    .with_context(|| format!("Failed to connect to the {:?} bus", config.bus))?;

    let registry = &config.registry;
    let handle = RegistryHandle::new(registry.namespace.clone(), registry.event_capacity);
    // Subscribe before the initial sync so `watch` sees the starting population.
    let events = matches!(cli.command, Command::Watch).then(|| handle.subscribe());

    let monitor = RegistryMonitor::start_with_handle(&connection, registry, handle)
        .await
        .with_context(|| {
            format!(
                "Failed to load objects from {} at {}",
                registry.service, registry.root_path
            )
        })?;

    let handle = monitor.handle();
    {
        let snapshot = handle.read();
        debug!(
            "Registry holds {} disks and {} drives",
            snapshot.disk_count(),
            snapshot.drive_count()
        );
    }

    match cli.command {
        Command::Roots => {
            let roots: Vec<RootEntry> = {
                let registry = handle.read();
                registry
                    .root_disks()
                    .iter()
                    .map(|root| RootEntry {
                        disk: root.summary(),
                        children: registry
                            .partitions_of(root.object_path())
                            .iter()
                            .map(|child| child.summary())
                            .collect(),
                    })
                    .collect()
            };
            if cli.json {
                println!("{}", output::to_json(&roots)?);
            } else {
                print!("{}", output::roots_table(&roots));
            }
        }
        Command::Disks => {
            let disks: Vec<_> = handle.disks().iter().map(|d| d.summary()).collect();
            if cli.json {
                println!("{}", output::to_json(&disks)?);
            } else {
                print!("{}", output::disks_table(&disks));
            }
        }
        Command::Drives => {
            let drives: Vec<_> = handle.drives().iter().map(|d| d.summary()).collect();
            if cli.json {
                println!("{}", output::to_json(&drives)?);
            } else {
                print!("{}", output::drives_table(&drives));
            }
        }
        Command::Disk { object_path } => {
            let Some(disk) = handle.disk(&object_path) else {
                anyhow::bail!("No cached block device at {object_path}");
            };
            let summary = disk.summary();
            if cli.json {
                println!("{}", output::to_json(&summary)?);
            } else {
                print!("{}", output::disk_detail(&summary));
            }
        }
        Command::Drive { object_path } => {
            let Some(drive) = handle.drive(&object_path) else {
                anyhow::bail!("No cached drive at {object_path}");
            };
            let summary = drive.summary();
            if cli.json {
                println!("{}", output::to_json(&summary)?);
            } else {
                print!("{}", output::drive_detail(&summary));
            }
        }
        Command::Watch => {
            if let Some(events) = events {
                watch(&monitor, events, cli.json).await?;
            }
        }
    }

    monitor.stop();
    Ok(())
}

async fn watch(
    monitor: &RegistryMonitor,
    mut events: tokio::sync::broadcast::Receiver<storage_udisks::RegistryEvent>,
    json: bool,
) -> Result<()> {
    info!("Watching for registry changes, press Ctrl+C to stop");

    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(event) => {
                    let record = event.record();
                    if json {
                        println!("{}", output::event_json(&record)?);
                    } else {
                        println!("{}", output::event_line(&record));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Output fell behind, {skipped} registry events were dropped");
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }

        if !monitor.is_running() {
            warn!("Registry monitor stopped, no further changes will be reported");
            break;
        }
    }

    Ok(())
}
