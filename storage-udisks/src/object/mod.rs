// SPDX-License-Identifier: GPL-3.0-only

//! Locally cached UDisks2 objects
//!
//! - `DiskObject` mirrors a block device and keeps every interface the remote
//!   object exposes.
//! - `DriveObject` mirrors a drive and keeps only the drive interface.

use std::collections::HashMap;

use zbus::zvariant::OwnedValue;

pub mod disk;
pub mod drive;
pub mod interfaces;

pub use disk::{DiskObject, DiskState};
pub use drive::DriveObject;
pub use interfaces::{
    BlockInterface, FilesystemInterface, PartitionInterface, PartitionTableInterface,
};

pub const BLOCK_IFACE: &str = "org.freedesktop.UDisks2.Block";
pub const PARTITION_TABLE_IFACE: &str = "org.freedesktop.UDisks2.PartitionTable";
pub const PARTITION_IFACE: &str = "org.freedesktop.UDisks2.Partition";
pub const FILESYSTEM_IFACE: &str = "org.freedesktop.UDisks2.Filesystem";

/// Property name → value
pub type PropertyMap = HashMap<String, OwnedValue>;

/// Interface name → properties
pub type InterfaceMap = HashMap<String, PropertyMap>;

/// Object path → interfaces, as reported by one `GetManagedObjects` call
pub type ManagedObjects = HashMap<String, InterfaceMap>;
