// SPDX-License-Identifier: GPL-3.0-only

//! Deferred registry notifications

use std::sync::{Arc, OnceLock};

use storage_types::{RegistryEventKind, RegistryEventRecord};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use crate::object::{DiskObject, DriveObject};

/// Notification about an object entering or leaving the registry.
///
/// Removal events hold the last registry-side reference to the removed
/// object; it is released once every subscriber has dropped the event.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    DiskAdded(Arc<DiskObject>),
    DriveAdded(Arc<DriveObject>),
    DiskRemoved(Arc<DiskObject>),
    DriveRemoved(Arc<DriveObject>),
}

impl RegistryEvent {
    pub fn kind(&self) -> RegistryEventKind {
        match self {
            Self::DiskAdded(_) => RegistryEventKind::DiskAdded,
            Self::DriveAdded(_) => RegistryEventKind::DriveAdded,
            Self::DiskRemoved(_) => RegistryEventKind::DiskRemoved,
            Self::DriveRemoved(_) => RegistryEventKind::DriveRemoved,
        }
    }

    pub fn object_path(&self) -> &str {
        match self {
            Self::DiskAdded(disk) | Self::DiskRemoved(disk) => disk.object_path(),
            Self::DriveAdded(drive) | Self::DriveRemoved(drive) => drive.object_path(),
        }
    }

    pub fn record(&self) -> RegistryEventRecord {
        RegistryEventRecord {
            kind: self.kind(),
            object_path: self.object_path().to_string(),
        }
    }
}

/// Broadcasts registry events on a later turn of the event loop.
///
/// Batches go through one FIFO queue drained by a single publisher task, so
/// subscribers see events in the order the passes produced them regardless
/// of the runtime flavor. The task is started by the first dispatch and ends
/// once every clone of the dispatcher is dropped.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    sender: broadcast::Sender<RegistryEvent>,
    queue: Arc<OnceLock<mpsc::UnboundedSender<Vec<RegistryEvent>>>>,
}

impl EventDispatcher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            queue: Arc::new(OnceLock::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Queue `events` for the publisher task instead of sending them inline.
    ///
    /// Must be called from within a tokio runtime. Returns `false` when
    /// there is nothing to publish.
    pub fn dispatch_deferred(&self, events: Vec<RegistryEvent>) -> bool {
        if events.is_empty() {
            return false;
        }

        debug!(
            "Queueing {} registry events for {} subscribers",
            events.len(),
            self.subscriber_count()
        );

        let queue = self
            .queue
            .get_or_init(|| spawn_publisher(self.sender.clone()));
        // Only fails if the publisher task is gone (runtime shutting down).
        if queue.send(events).is_err() {
            warn!("Registry event publisher stopped, dropping events");
        }
        true
    }
}

fn spawn_publisher(
    sender: broadcast::Sender<RegistryEvent>,
) -> mpsc::UnboundedSender<Vec<RegistryEvent>> {
    let (queue, mut batches) = mpsc::unbounded_channel::<Vec<RegistryEvent>>();

    tokio::spawn(async move {
        while let Some(batch) = batches.recv().await {
            for event in batch {
                debug!("{:?} {}", event.kind(), event.object_path());
                // No subscribers is fine: the event is simply dropped.
                let _ = sender.send(event);
            }
        }
    });

    queue
}
