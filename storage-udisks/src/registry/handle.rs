// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use storage_types::ObjectNamespace;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{EventDispatcher, ObjectRegistry, RegistryEvent, SyncReport};
use crate::error::Result;
use crate::object::{DiskObject, DriveObject};
use crate::source::ManagedObjectSource;

/// Shared access to a registry and its event stream.
///
/// Cloning is cheap; every clone sees the same cache. Queries take the lock
/// briefly and hand out `Arc`s, so no lock is ever held across an await.
#[derive(Debug, Clone)]
pub struct RegistryHandle {
    registry: Arc<RwLock<ObjectRegistry>>,
    dispatcher: EventDispatcher,
}

impl RegistryHandle {
    pub fn new(namespace: ObjectNamespace, event_capacity: usize) -> Self {
        Self {
            registry: Arc::new(RwLock::new(ObjectRegistry::new(namespace))),
            dispatcher: EventDispatcher::new(event_capacity),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.dispatcher.subscribe()
    }

    /// Run one full synchronization pass against `source`.
    ///
    /// A failed fetch leaves the cache untouched and publishes nothing.
    /// Events produced by the pass are published after the registry lock is
    /// released, from a task spawned on the current runtime.
    pub async fn sync(&self, source: &dyn ManagedObjectSource) -> Result<SyncReport> {
        let snapshot = match source.managed_objects().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to fetch managed objects, keeping cached state: {e}");
                return Err(e);
            }
        };

        let outcome = {
            let mut registry = self
                .registry
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            registry.apply_snapshot(snapshot)
        };

        let report = outcome.report;
        if report.has_membership_changes() {
            info!(
                "Registry synchronized: {} added, {} removed, {} updated",
                report.added, report.removed, report.updated
            );
        } else {
            debug!(
                "Registry synchronized: {} updated, {} ignored",
                report.updated, report.ignored
            );
        }

        self.dispatcher.dispatch_deferred(outcome.events);
        Ok(report)
    }

    /// Read access to the whole registry for compound queries.
    pub fn read(&self) -> RwLockReadGuard<'_, ObjectRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn disk(&self, path: &str) -> Option<Arc<DiskObject>> {
        self.read().disk(path)
    }

    pub fn drive(&self, path: &str) -> Option<Arc<DriveObject>> {
        self.read().drive(path)
    }

    pub fn root_disks(&self) -> Vec<Arc<DiskObject>> {
        self.read().root_disks()
    }

    pub fn disks(&self) -> Vec<Arc<DiskObject>> {
        self.read().disks()
    }

    pub fn drives(&self) -> Vec<Arc<DriveObject>> {
        self.read().drives()
    }
}
