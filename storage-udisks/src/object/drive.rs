// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use storage_types::DriveSummary;
use udisks2::drive::RotationRate;

use super::PropertyMap;
use crate::dbus::values::{as_bool, as_i32, as_string, as_u64};

/// A cached drive object.
///
/// Only the properties of the drive interface are kept; other interfaces
/// on drive paths (e.g. `Drive.Ata`) are never handed to this type. Updates
/// happen in place and are visible to every holder of the `Arc`.
#[derive(Debug)]
pub struct DriveObject {
    object_path: String,
    properties: RwLock<PropertyMap>,
}

impl DriveObject {
    pub fn new(object_path: impl Into<String>) -> Self {
        Self {
            object_path: object_path.into(),
            properties: RwLock::new(PropertyMap::new()),
        }
    }

    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// Replace the drive properties. Returns `false` if nothing changed.
    pub fn update_properties(&self, properties: PropertyMap) -> bool {
        let mut current = self
            .properties
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == properties {
            return false;
        }
        *current = properties;
        true
    }

    /// Current drive properties; do not hold the guard across an await.
    pub fn properties(&self) -> RwLockReadGuard<'_, PropertyMap> {
        self.properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn string(&self, name: &str) -> String {
        self.properties()
            .get(name)
            .and_then(as_string)
            .unwrap_or_default()
    }

    fn flag(&self, name: &str) -> bool {
        self.properties()
            .get(name)
            .and_then(as_bool)
            .unwrap_or(false)
    }

    pub fn id(&self) -> String {
        self.string("Id")
    }

    pub fn vendor(&self) -> String {
        self.string("Vendor")
    }

    pub fn model(&self) -> String {
        self.string("Model")
    }

    pub fn serial(&self) -> String {
        self.string("Serial")
    }

    pub fn revision(&self) -> String {
        self.string("Revision")
    }

    pub fn connection_bus(&self) -> String {
        self.string("ConnectionBus")
    }

    pub fn size(&self) -> u64 {
        self.properties().get("Size").and_then(as_u64).unwrap_or(0)
    }

    pub fn removable(&self) -> bool {
        self.flag("Removable")
    }

    pub fn ejectable(&self) -> bool {
        self.flag("Ejectable")
    }

    pub fn media_removable(&self) -> bool {
        self.flag("MediaRemovable")
    }

    pub fn media_available(&self) -> bool {
        self.flag("MediaAvailable")
    }

    pub fn optical(&self) -> bool {
        self.flag("Optical")
    }

    pub fn can_power_off(&self) -> bool {
        self.flag("CanPowerOff")
    }

    /// UDisks2 encodes -1 as unknown and 0 as non-rotating media.
    pub fn rotation_rate(&self) -> RotationRate {
        match self.properties().get("RotationRate").and_then(as_i32) {
            Some(0) => RotationRate::NonRotating,
            Some(rpm) if rpm > 0 => RotationRate::Rotating(rpm),
            _ => RotationRate::Unknown,
        }
    }

    pub fn summary(&self) -> DriveSummary {
        let rotation_rate = match self.rotation_rate() {
            RotationRate::Rotating(rpm) => Some(rpm),
            RotationRate::NonRotating => Some(0),
            RotationRate::Unknown => None,
        };

        DriveSummary {
            object_path: self.object_path.clone(),
            id: self.id(),
            vendor: self.vendor(),
            model: self.model(),
            serial: self.serial(),
            revision: self.revision(),
            size: self.size(),
            connection_bus: self.connection_bus(),
            rotation_rate,
            removable: self.removable(),
            ejectable: self.ejectable(),
            media_removable: self.media_removable(),
            media_available: self.media_available(),
            optical: self.optical(),
            can_power_off: self.can_power_off(),
        }
    }
}
