// SPDX-License-Identifier: GPL-3.0-only

//! Typed, borrowed views over the property bags of a block device.

use crate::dbus::bytestring::{decode_mount_points, owned_value_to_bytestring};
use crate::dbus::values::{
    as_bool, as_bytestring_list, as_object_path, as_object_paths, as_string, as_u32, as_u64,
};

use super::PropertyMap;

/// `org.freedesktop.UDisks2.Block`
#[derive(Debug, Clone, Copy)]
pub struct BlockInterface<'a> {
    properties: &'a PropertyMap,
}

impl<'a> BlockInterface<'a> {
    pub(crate) fn new(properties: &'a PropertyMap) -> Self {
        Self { properties }
    }

    fn bytestring(&self, name: &str) -> String {
        self.properties
            .get(name)
            .and_then(owned_value_to_bytestring)
            .unwrap_or_default()
    }

    fn string(&self, name: &str) -> String {
        self.properties
            .get(name)
            .and_then(as_string)
            .unwrap_or_default()
    }

    /// Special device file (e.g. "/dev/sda")
    pub fn device(&self) -> String {
        self.bytestring("Device")
    }

    pub fn preferred_device(&self) -> String {
        self.bytestring("PreferredDevice")
    }

    /// Preferred device if set, otherwise the device file.
    pub fn display_device(&self) -> String {
        let preferred = self.preferred_device();
        if preferred.is_empty() {
            self.device()
        } else {
            preferred
        }
    }

    pub fn size(&self) -> u64 {
        self.properties.get("Size").and_then(as_u64).unwrap_or(0)
    }

    pub fn read_only(&self) -> bool {
        self.properties
            .get("ReadOnly")
            .and_then(as_bool)
            .unwrap_or(false)
    }

    pub fn id_label(&self) -> String {
        self.string("IdLabel")
    }

    pub fn id_type(&self) -> String {
        self.string("IdType")
    }

    pub fn id_usage(&self) -> String {
        self.string("IdUsage")
    }

    pub fn id_uuid(&self) -> String {
        self.string("IdUUID")
    }

    pub fn hint_system(&self) -> bool {
        self.properties
            .get("HintSystem")
            .and_then(as_bool)
            .unwrap_or(false)
    }

    pub fn hint_ignore(&self) -> bool {
        self.properties
            .get("HintIgnore")
            .and_then(as_bool)
            .unwrap_or(false)
    }

    /// Object path of the drive this block device belongs to, if any.
    pub fn drive(&self) -> Option<String> {
        self.properties.get("Drive").and_then(as_object_path)
    }
}

/// `org.freedesktop.UDisks2.PartitionTable`
#[derive(Debug, Clone, Copy)]
pub struct PartitionTableInterface<'a> {
    properties: &'a PropertyMap,
}

impl<'a> PartitionTableInterface<'a> {
    pub(crate) fn new(properties: &'a PropertyMap) -> Self {
        Self { properties }
    }

    /// Table type ("gpt", "dos"); `None` when unknown.
    pub fn table_type(&self) -> Option<String> {
        self.properties
            .get("Type")
            .and_then(as_string)
            .filter(|t| !t.is_empty())
    }

    /// Object paths of the partitions in this table.
    pub fn partitions(&self) -> Vec<String> {
        self.properties
            .get("Partitions")
            .and_then(as_object_paths)
            .unwrap_or_default()
    }
}

/// `org.freedesktop.UDisks2.Partition`
#[derive(Debug, Clone, Copy)]
pub struct PartitionInterface<'a> {
    properties: &'a PropertyMap,
}

impl<'a> PartitionInterface<'a> {
    pub(crate) fn new(properties: &'a PropertyMap) -> Self {
        Self { properties }
    }

    pub fn number(&self) -> Option<u32> {
        self.properties.get("Number").and_then(as_u32)
    }

    pub fn offset(&self) -> u64 {
        self.properties.get("Offset").and_then(as_u64).unwrap_or(0)
    }

    pub fn size(&self) -> u64 {
        self.properties.get("Size").and_then(as_u64).unwrap_or(0)
    }

    pub fn name(&self) -> String {
        self.properties
            .get("Name")
            .and_then(as_string)
            .unwrap_or_default()
    }

    /// Partition type GUID or MBR type code
    pub fn partition_type(&self) -> String {
        self.properties
            .get("Type")
            .and_then(as_string)
            .unwrap_or_default()
    }

    /// Object path of the block device holding the partition table.
    pub fn table(&self) -> Option<String> {
        self.properties.get("Table").and_then(as_object_path)
    }
}

/// `org.freedesktop.UDisks2.Filesystem`
#[derive(Debug, Clone, Copy)]
pub struct FilesystemInterface<'a> {
    properties: &'a PropertyMap,
}

impl<'a> FilesystemInterface<'a> {
    pub(crate) fn new(properties: &'a PropertyMap) -> Self {
        Self { properties }
    }

    pub fn mount_points(&self) -> Vec<String> {
        self.properties
            .get("MountPoints")
            .and_then(as_bytestring_list)
            .map(decode_mount_points)
            .unwrap_or_default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.mount_points().is_empty()
    }
}
