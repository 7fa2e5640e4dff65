//! Registry notification models

use serde::{Deserialize, Serialize};

use crate::ObjectKind;

/// What happened to a cached object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryEventKind {
    DiskAdded,
    DriveAdded,
    DiskRemoved,
    DriveRemoved,
}

impl RegistryEventKind {
    pub fn object_kind(self) -> ObjectKind {
        match self {
            Self::DiskAdded | Self::DiskRemoved => ObjectKind::BlockDevice,
            Self::DriveAdded | Self::DriveRemoved => ObjectKind::Drive,
        }
    }

    pub fn is_removal(self) -> bool {
        matches!(self, Self::DiskRemoved | Self::DriveRemoved)
    }
}

/// Serializable record of a registry notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEventRecord {
    pub kind: RegistryEventKind,
    pub object_path: String,
}
