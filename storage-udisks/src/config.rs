// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use storage_types::ObjectNamespace;

pub const UDISKS2_SERVICE: &str = "org.freedesktop.UDisks2";
pub const UDISKS2_ROOT_PATH: &str = "/org/freedesktop/UDisks2";
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Where the object manager lives and how its paths are classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Well-known bus name of the object manager
    pub service: String,

    /// Object path of the object manager
    pub root_path: String,

    #[serde(flatten)]
    pub namespace: ObjectNamespace,

    /// Events buffered per subscriber before the oldest are dropped
    pub event_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            service: UDISKS2_SERVICE.to_string(),
            root_path: UDISKS2_ROOT_PATH.to_string(),
            namespace: ObjectNamespace::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: RegistryConfig = serde_json::from_str(
            r#"{"service": "org.example.Disks", "drive_prefix": "/org/example/drives"}"#,
        )
        .unwrap();

        assert_eq!(config.service, "org.example.Disks");
        assert_eq!(config.root_path, UDISKS2_ROOT_PATH);
        assert_eq!(config.namespace.drive_prefix, "/org/example/drives");
        assert_eq!(
            config.namespace.block_prefix,
            storage_types::BLOCK_DEVICES_PREFIX
        );
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    }
}
