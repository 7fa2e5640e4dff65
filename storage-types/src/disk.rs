//! Disk and drive summary models
//!
//! Flat, serializable views of the cached registry objects. The registry in
//! storage-udisks produces these; the monitor CLI prints them.

use serde::{Deserialize, Serialize};

use crate::bytes_to_pretty;

/// Summary of a cached block device object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiskSummary {
    /// UDisks2 object path
    pub object_path: String,

    /// Device path (e.g., "/dev/sda"), preferred device when available
    pub device: String,

    /// Size in bytes
    pub size: u64,

    /// Filesystem or content label
    pub label: String,

    /// Content type (e.g., "ext4", "crypto_LUKS")
    pub id_type: String,

    /// Content usage (e.g., "filesystem", "crypto")
    pub id_usage: String,

    /// Object path of the drive this block device belongs to
    pub drive: Option<String>,

    /// Partition table type ("gpt", "dos") if the device carries one
    pub partition_table_type: Option<String>,

    /// Object paths of the partitions listed by this device's partition table
    pub partitions: Vec<String>,

    /// Partition number if this device is itself a partition
    pub partition_number: Option<u32>,

    /// Current mount points
    pub mount_points: Vec<String>,

    /// Remote interfaces currently exposed by the object
    pub interfaces: Vec<String>,
}

impl DiskSummary {
    /// Get a human-readable display name for the block device
    pub fn display_name(&self) -> String {
        if !self.label.is_empty() {
            return self.label.clone();
        }

        let source = if self.device.is_empty() {
            &self.object_path
        } else {
            &self.device
        };

        source
            .split('/')
            .next_back()
            .unwrap_or(source)
            .to_string()
    }

    pub fn pretty_size(&self) -> String {
        bytes_to_pretty(&self.size, false)
    }
}

/// Summary of a cached drive object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriveSummary {
    /// UDisks2 object path
    pub object_path: String,

    /// UDisks2 drive identifier
    pub id: String,

    pub vendor: String,

    pub model: String,

    pub serial: String,

    /// Firmware revision
    pub revision: String,

    /// Total size in bytes
    pub size: u64,

    /// Connection bus (e.g., "usb", "sdio"); empty when unknown
    pub connection_bus: String,

    /// Rotation rate in RPM (None when unknown, Some(0) for non-rotating media)
    pub rotation_rate: Option<i32>,

    pub removable: bool,

    pub ejectable: bool,

    pub media_removable: bool,

    pub media_available: bool,

    pub optical: bool,

    pub can_power_off: bool,
}

impl DriveSummary {
    /// Get a human-readable display name for the drive
    pub fn display_name(&self) -> String {
        match (self.vendor.is_empty(), self.model.is_empty()) {
            (false, false) => format!("{} {}", self.vendor, self.model),
            (true, false) => self.model.clone(),
            (false, true) => format!("{} Drive", self.vendor),
            (true, true) => self
                .object_path
                .split('/')
                .next_back()
                .unwrap_or(&self.object_path)
                .to_string(),
        }
    }

    pub fn pretty_size(&self) -> String {
        bytes_to_pretty(&self.size, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_summary_serialization() {
        let disk = DiskSummary {
            object_path: "/org/freedesktop/UDisks2/block_devices/sda".to_string(),
            device: "/dev/sda".to_string(),
            size: 1000000000000,
            label: String::new(),
            id_type: String::new(),
            id_usage: String::new(),
            drive: Some("/org/freedesktop/UDisks2/drives/Samsung_SSD".to_string()),
            partition_table_type: Some("gpt".to_string()),
            partitions: vec!["/org/freedesktop/UDisks2/block_devices/sda1".to_string()],
            partition_number: None,
            mount_points: vec![],
            interfaces: vec![
                "org.freedesktop.UDisks2.Block".to_string(),
                "org.freedesktop.UDisks2.PartitionTable".to_string(),
            ],
        };

        let json = serde_json::to_string(&disk).unwrap();
        let deserialized: DiskSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(disk, deserialized);
    }

    #[test]
    fn test_disk_display_name_fallbacks() {
        let mut disk = DiskSummary {
            object_path: "/org/freedesktop/UDisks2/block_devices/sdb1".to_string(),
            ..Default::default()
        };
        assert_eq!(disk.display_name(), "sdb1");

        disk.device = "/dev/sdb1".to_string();
        assert_eq!(disk.display_name(), "sdb1");

        disk.label = "BACKUP".to_string();
        assert_eq!(disk.display_name(), "BACKUP");
    }

    #[test]
    fn test_drive_display_name_fallbacks() {
        let mut drive = DriveSummary {
            object_path: "/org/freedesktop/UDisks2/drives/VBOX_HARDDISK".to_string(),
            ..Default::default()
        };
        assert_eq!(drive.display_name(), "VBOX_HARDDISK");

        drive.vendor = "ATA".to_string();
        assert_eq!(drive.display_name(), "ATA Drive");

        drive.model = "VBOX HARDDISK".to_string();
        assert_eq!(drive.display_name(), "ATA VBOX HARDDISK");
    }
}
