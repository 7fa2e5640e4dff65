// SPDX-License-Identifier: GPL-3.0-only

//! Signal-driven registry synchronization

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::Stream;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use zbus::Connection;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::registry::{RegistryEvent, RegistryHandle};
use crate::source::{ManagedObjectSource, UDisks2ObjectSource};

/// Keeps a registry in sync with the UDisks2 object manager.
///
/// Every `InterfacesAdded` / `InterfacesRemoved` signal triggers a full
/// re-fetch; signal payloads are not inspected. Dropping the monitor stops
/// the signal task; handles already given out keep their last state.
pub struct RegistryMonitor {
    handle: RegistryHandle,
    task: JoinHandle<()>,
}

impl RegistryMonitor {
    /// Subscribe to the change signals, then run the initial synchronization.
    ///
    /// Fails if the subscription or the initial fetch fails. Later fetch
    /// failures are logged and the monitor keeps running.
    pub async fn start(connection: &Connection, config: &RegistryConfig) -> Result<Self> {
        let handle = RegistryHandle::new(config.namespace.clone(), config.event_capacity);
        Self::start_with_handle(connection, config, handle).await
    }

    /// Like [`RegistryMonitor::start`], but fills a caller-provided handle.
    ///
    /// Receivers subscribed to `handle` beforehand also observe the
    /// `*Added` events of the initial synchronization.
    pub async fn start_with_handle(
        connection: &Connection,
        config: &RegistryConfig,
        handle: RegistryHandle,
    ) -> Result<Self> {
        let source = Arc::new(UDisks2ObjectSource::new(connection, config).await?);

        let added = source
            .proxy()
            .receive_interfaces_added()
            .await
            .map_err(|e| RegistryError::SubscriptionFailed(e.to_string()))?;
        let removed = source
            .proxy()
            .receive_interfaces_removed()
            .await
            .map_err(|e| RegistryError::SubscriptionFailed(e.to_string()))?;

        handle.sync(source.as_ref()).await?;
        info!(
            "Watching {} at {} for object changes",
            config.service, config.root_path
        );

        let task = tokio::spawn(run_signal_loop(handle.clone(), source, added, removed));

        Ok(Self { handle, task })
    }

    pub fn handle(&self) -> &RegistryHandle {
        &self.handle
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.handle.subscribe()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for RegistryMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Re-synchronize once per received signal until either stream ends.
pub(crate) async fn run_signal_loop<S, A, R>(
    handle: RegistryHandle,
    source: Arc<S>,
    mut added: A,
    mut removed: R,
) where
    S: ManagedObjectSource,
    A: Stream + Unpin,
    R: Stream + Unpin,
{
    loop {
        tokio::select! {
            maybe_added = added.next() => {
                if maybe_added.is_none() {
                    break;
                }
                debug!("InterfacesAdded received");
            }
            maybe_removed = removed.next() => {
                if maybe_removed.is_none() {
                    break;
                }
                debug!("InterfacesRemoved received");
            }
        }

        // Failures are already logged by sync; the next signal retries.
        let _ = handle.sync(source.as_ref()).await;
    }

    info!("Object manager signal streams closed, registry monitor stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ManagedObjects;
    use crate::source::StaticObjectSource;
    use crate::test_support::*;
    use futures::channel::mpsc;
    use storage_types::{ObjectNamespace, RegistryEventKind};

    #[tokio::test]
    async fn each_signal_triggers_a_full_sync() {
        let handle = RegistryHandle::new(ObjectNamespace::default(), 16);
        let mut events = handle.subscribe();
        let source = Arc::new(StaticObjectSource::default());

        let (added_tx, added_rx) = mpsc::unbounded::<()>();
        let (removed_tx, removed_rx) = mpsc::unbounded::<()>();
        let task = tokio::spawn(run_signal_loop(
            handle.clone(),
            Arc::clone(&source),
            added_rx,
            removed_rx,
        ));

        source.set(ManagedObjects::from([(
            block_path("sdd"),
            block_interfaces("/dev/sdd", 1),
        )]));
        added_tx.unbounded_send(()).unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind(), RegistryEventKind::DiskAdded);

        source.set(ManagedObjects::new());
        removed_tx.unbounded_send(()).unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.kind(), RegistryEventKind::DiskRemoved);
        assert!(handle.disk(&block_path("sdd")).is_none());

        drop(added_tx);
        task.await.unwrap();
    }

    #[tokio::test]
    async fn failed_sync_does_not_stop_the_loop() {
        let handle = RegistryHandle::new(ObjectNamespace::default(), 16);
        let mut events = handle.subscribe();
        let source = Arc::new(StaticObjectSource::unavailable());

        let (added_tx, added_rx) = mpsc::unbounded::<()>();
        let (_removed_tx, removed_rx) = mpsc::unbounded::<()>();
        let task = tokio::spawn(run_signal_loop(
            handle.clone(),
            Arc::clone(&source),
            added_rx,
            removed_rx,
        ));

        added_tx.unbounded_send(()).unwrap();
        tokio::task::yield_now().await;
        assert!(handle.drives().is_empty());

        source.set(ManagedObjects::from([(
            drive_path("d1"),
            drive_interfaces("SanDisk", "Ultra", 1),
        )]));
        added_tx.unbounded_send(()).unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind(), RegistryEventKind::DriveAdded);
        assert!(!task.is_finished());

        drop(added_tx);
        task.await.unwrap();
    }
}
