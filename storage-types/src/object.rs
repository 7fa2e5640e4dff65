// SPDX-License-Identifier: GPL-3.0-only

//! Object path namespace of the UDisks2 object manager
//!
//! UDisks2 publishes block devices and drives under two fixed path prefixes.
//! Classification is a pure function of the path, so a path always maps to
//! at most one object kind.

use serde::{Deserialize, Serialize};

/// Block device objects live under this prefix.
pub const BLOCK_DEVICES_PREFIX: &str = "/org/freedesktop/UDisks2/block_devices";

/// Drive objects live under this prefix.
pub const DRIVES_PREFIX: &str = "/org/freedesktop/UDisks2/drives";

/// The only interface handed to drive objects.
pub const DRIVE_INTERFACE: &str = "org.freedesktop.UDisks2.Drive";

/// Kind of locally cached object a remote path maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A block device (`org.freedesktop.UDisks2.Block` and friends)
    BlockDevice,

    /// A physical or logical drive (`org.freedesktop.UDisks2.Drive`)
    Drive,
}

/// Path prefixes and the drive interface name used to classify objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectNamespace {
    pub block_prefix: String,
    pub drive_prefix: String,
    pub drive_interface: String,
}

impl Default for ObjectNamespace {
    fn default() -> Self {
        Self {
            block_prefix: BLOCK_DEVICES_PREFIX.to_string(),
            drive_prefix: DRIVES_PREFIX.to_string(),
            drive_interface: DRIVE_INTERFACE.to_string(),
        }
    }
}

impl ObjectNamespace {
    /// Classify an object path by literal prefix match.
    ///
    /// The block device prefix is checked first. Paths outside both
    /// namespaces (the manager object, jobs, mdraid arrays...) return `None`.
    pub fn classify(&self, path: &str) -> Option<ObjectKind> {
        if path.starts_with(&self.block_prefix) {
            Some(ObjectKind::BlockDevice)
        } else if path.starts_with(&self.drive_prefix) {
            Some(ObjectKind::Drive)
        } else {
            None
        }
    }
}

/// Classify a path against the default UDisks2 namespace.
pub fn classify(path: &str) -> Option<ObjectKind> {
    ObjectNamespace::default().classify(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_udisks_paths() {
        assert_eq!(
            classify("/org/freedesktop/UDisks2/block_devices/sda"),
            Some(ObjectKind::BlockDevice)
        );
        assert_eq!(
            classify("/org/freedesktop/UDisks2/drives/Samsung_SSD_970_EVO_S1234"),
            Some(ObjectKind::Drive)
        );
        assert_eq!(classify("/org/freedesktop/UDisks2/Manager"), None);
        assert_eq!(classify("/org/freedesktop/UDisks2/jobs/12"), None);
        assert_eq!(classify("/"), None);
    }

    #[test]
    fn custom_namespace_is_respected() {
        let namespace = ObjectNamespace {
            block_prefix: "/test/blocks".to_string(),
            drive_prefix: "/test/drives".to_string(),
            drive_interface: "test.Drive".to_string(),
        };

        assert_eq!(
            namespace.classify("/test/blocks/loop0"),
            Some(ObjectKind::BlockDevice)
        );
        assert_eq!(namespace.classify("/test/drives/d0"), Some(ObjectKind::Drive));
        assert_eq!(
            namespace.classify("/org/freedesktop/UDisks2/block_devices/sda"),
            None
        );
    }

    #[test]
    fn namespace_deserializes_with_defaults() {
        let namespace: ObjectNamespace =
            serde_json::from_str(r#"{"drive_prefix": "/x/drives"}"#).unwrap();
        assert_eq!(namespace.block_prefix, BLOCK_DEVICES_PREFIX);
        assert_eq!(namespace.drive_prefix, "/x/drives");
        assert_eq!(namespace.drive_interface, DRIVE_INTERFACE);
    }
}
