// SPDX-License-Identifier: GPL-3.0-only

//! Snapshot sources for the registry

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use zbus::Connection;

use crate::config::RegistryConfig;
use crate::dbus::UDisks2ObjectManagerProxy;
use crate::error::{RegistryError, Result};
use crate::object::ManagedObjects;

/// Anything that can produce a full object-manager snapshot.
#[async_trait]
pub trait ManagedObjectSource: Send + Sync {
    async fn managed_objects(&self) -> Result<ManagedObjects>;
}

/// `GetManagedObjects` on the UDisks2 object manager.
pub struct UDisks2ObjectSource {
    proxy: UDisks2ObjectManagerProxy<'static>,
}

impl UDisks2ObjectSource {
    pub async fn new(connection: &Connection, config: &RegistryConfig) -> Result<Self> {
        let proxy = UDisks2ObjectManagerProxy::builder(connection)
            .destination(config.service.clone())?
            .path(config.root_path.clone())?
            .build()
            .await?;

        Ok(Self { proxy })
    }

    pub fn proxy(&self) -> &UDisks2ObjectManagerProxy<'static> {
        &self.proxy
    }
}

#[async_trait]
impl ManagedObjectSource for UDisks2ObjectSource {
    async fn managed_objects(&self) -> Result<ManagedObjects> {
        let reply = self
            .proxy
            .get_managed_objects()
            .await
            .map_err(|error| RegistryError::DBusError(error.to_string()))?;

        Ok(reply
            .into_iter()
            .map(|(path, interfaces)| (path.as_str().to_string(), interfaces))
            .collect())
    }
}

/// In-memory snapshot source.
///
/// Holds the snapshot handed out on the next fetch; `None` makes fetches
/// fail, which stands in for an unreachable service.
#[derive(Debug)]
pub struct StaticObjectSource {
    snapshot: Mutex<Option<ManagedObjects>>,
}

impl Default for StaticObjectSource {
    fn default() -> Self {
        Self::new(ManagedObjects::new())
    }
}

impl StaticObjectSource {
    pub fn new(snapshot: ManagedObjects) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            snapshot: Mutex::new(None),
        }
    }

    pub fn set(&self, snapshot: ManagedObjects) {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    pub fn set_unavailable(&self) {
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl ManagedObjectSource for StaticObjectSource {
    async fn managed_objects(&self) -> Result<ManagedObjects> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| RegistryError::SourceUnavailable("no snapshot available".to_string()))
    }
}
