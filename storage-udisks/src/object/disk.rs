// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use storage_types::DiskSummary;

use super::{
    BLOCK_IFACE, BlockInterface, FILESYSTEM_IFACE, FilesystemInterface, InterfaceMap,
    PARTITION_IFACE, PARTITION_TABLE_IFACE, PartitionInterface, PartitionTableInterface,
    PropertyMap,
};

/// A cached block device object.
///
/// Holds every interface the remote object currently exposes. The registry
/// updates the object in place, so every holder of the `Arc` sees the
/// current state. The whole interface map is replaced on each update, so
/// interfaces that disappear remotely disappear here too.
#[derive(Debug)]
pub struct DiskObject {
    object_path: String,
    interfaces: RwLock<InterfaceMap>,
}

impl DiskObject {
    pub fn new(object_path: impl Into<String>) -> Self {
        Self {
            object_path: object_path.into(),
            interfaces: RwLock::new(InterfaceMap::new()),
        }
    }

    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// Replace the interface map. Returns `false` if nothing changed.
    pub fn update_interfaces(&self, interfaces: InterfaceMap) -> bool {
        let mut current = self
            .interfaces
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == interfaces {
            return false;
        }
        *current = interfaces;
        true
    }

    /// Borrow the current interfaces.
    ///
    /// Updates wait while the returned state is alive; do not hold it across
    /// an await.
    pub fn read(&self) -> DiskState<'_> {
        DiskState {
            interfaces: self
                .interfaces
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub fn has_interface(&self, name: &str) -> bool {
        self.read().interface_map().contains_key(name)
    }

    /// Object paths this disk's partition table lists, empty without one.
    pub fn partition_paths(&self) -> Vec<String> {
        self.read()
            .partition_table()
            .map(|table| table.partitions())
            .unwrap_or_default()
    }

    /// Object path of the drive the block interface points at.
    pub fn drive_path(&self) -> Option<String> {
        self.read().block().and_then(|block| block.drive())
    }

    pub fn summary(&self) -> DiskSummary {
        let state = self.read();
        let block = state.block();

        DiskSummary {
            object_path: self.object_path.clone(),
            device: block.map(|b| b.display_device()).unwrap_or_default(),
            size: block.map(|b| b.size()).unwrap_or(0),
            label: block.map(|b| b.id_label()).unwrap_or_default(),
            id_type: block.map(|b| b.id_type()).unwrap_or_default(),
            id_usage: block.map(|b| b.id_usage()).unwrap_or_default(),
            drive: block.and_then(|b| b.drive()),
            partition_table_type: state.partition_table().and_then(|t| t.table_type()),
            partitions: state
                .partition_table()
                .map(|t| t.partitions())
                .unwrap_or_default(),
            partition_number: state.partition().and_then(|p| p.number()),
            mount_points: state
                .filesystem()
                .map(|f| f.mount_points())
                .unwrap_or_default(),
            interfaces: state.names().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Read access to a disk's interfaces at one point in time.
pub struct DiskState<'a> {
    interfaces: RwLockReadGuard<'a, InterfaceMap>,
}

impl DiskState<'_> {
    pub fn interface_map(&self) -> &InterfaceMap {
        &self.interfaces
    }

    /// Interface names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.interfaces.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn properties(&self, interface: &str) -> Option<&PropertyMap> {
        self.interfaces.get(interface)
    }

    pub fn block(&self) -> Option<BlockInterface<'_>> {
        self.properties(BLOCK_IFACE).map(BlockInterface::new)
    }

    pub fn partition_table(&self) -> Option<PartitionTableInterface<'_>> {
        self.properties(PARTITION_TABLE_IFACE)
            .map(PartitionTableInterface::new)
    }

    pub fn partition(&self) -> Option<PartitionInterface<'_>> {
        self.properties(PARTITION_IFACE).map(PartitionInterface::new)
    }

    pub fn filesystem(&self) -> Option<FilesystemInterface<'_>> {
        self.properties(FILESYSTEM_IFACE)
            .map(FilesystemInterface::new)
    }
}
