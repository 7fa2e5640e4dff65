// SPDX-License-Identifier: GPL-3.0-only

//! Local cache of the UDisks2 disk and drive objects.
//!
//! `RegistryMonitor` subscribes to the object manager's change signals and
//! re-synchronizes an `ObjectRegistry` on each of them; consumers query the
//! cache through a `RegistryHandle` and receive added/removed notifications
//! as `RegistryEvent`s.

pub mod config;
pub mod dbus;
pub mod error;
pub mod monitor;
pub mod object;
pub mod registry;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export storage-types models
pub use storage_types;
pub use storage_types::{
    DiskSummary, DriveSummary, ObjectKind, ObjectNamespace, RegistryEventKind,
    RegistryEventRecord,
};

// Re-export commonly used zbus types
pub use zbus::Connection;
pub use zbus::zvariant::{OwnedObjectPath, OwnedValue};

pub use config::{DEFAULT_EVENT_CAPACITY, RegistryConfig, UDISKS2_ROOT_PATH, UDISKS2_SERVICE};
pub use error::RegistryError;
pub use monitor::RegistryMonitor;
pub use object::{
    BlockInterface, DiskObject, DiskState, DriveObject, FilesystemInterface, InterfaceMap,
    ManagedObjects, PartitionInterface, PartitionTableInterface, PropertyMap,
};
pub use registry::{
    EventDispatcher, ObjectRegistry, RegistryEvent, RegistryHandle, SyncOutcome, SyncReport,
};
pub use source::{ManagedObjectSource, StaticObjectSource, UDisks2ObjectSource};
