// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{BusKind, Config, LoggingLevel};

#[derive(Debug, Parser)]
#[command(name = "cosmic-ext-storage-monitor")]
#[command(about = "Inspect and watch the UDisks2 disk and drive registry")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to $XDG_CONFIG_HOME/cosmic-ext-storage-monitor/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Connect to the session bus instead of the system bus
    #[arg(long, global = true)]
    pub session: bool,

    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LoggingLevel>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Whole disks and their partitions
    Roots,
    /// Every cached block device
    Disks,
    /// Every cached drive
    Drives,
    /// One block device by object path
    Disk { object_path: String },
    /// One drive by object path
    Drive { object_path: String },
    /// Print registry events until interrupted
    Watch,
}

impl Cli {
    /// Command-line flags win over the configuration file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.session {
            config.bus = BusKind::Session;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
    }
}
