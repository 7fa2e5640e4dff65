// SPDX-License-Identifier: GPL-3.0-only

//! Object registry cache
//!
//! Keeps a typed mirror of the UDisks2 object manager:
//! - `ObjectRegistry` applies snapshots and answers queries
//! - `RegistryHandle` shares a registry, runs synchronization passes against
//!   a snapshot source and publishes the resulting events
//! - `EventDispatcher` delivers those events on a later turn of the loop

pub mod events;
pub mod handle;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use storage_types::{ObjectKind, ObjectNamespace};
use tracing::trace;

use crate::object::{DiskObject, DriveObject, ManagedObjects};

pub use events::{EventDispatcher, RegistryEvent};
pub use handle::RegistryHandle;

/// Counters for one synchronization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub ignored: usize,
}

impl SyncReport {
    /// True if the pass added or removed anything.
    pub fn has_membership_changes(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Result of applying a snapshot: counters plus the events to publish.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub report: SyncReport,
    pub events: Vec<RegistryEvent>,
}

/// Two mappings, object path → disk and object path → drive.
///
/// Membership only changes through [`ObjectRegistry::apply_snapshot`], so the
/// cache never holds an object the last snapshot did not report.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    namespace: ObjectNamespace,
    disks: HashMap<String, Arc<DiskObject>>,
    drives: HashMap<String, Arc<DriveObject>>,
}

impl ObjectRegistry {
    pub fn new(namespace: ObjectNamespace) -> Self {
        Self {
            namespace,
            disks: HashMap::new(),
            drives: HashMap::new(),
        }
    }

    pub fn namespace(&self) -> &ObjectNamespace {
        &self.namespace
    }

    /// Diff `snapshot` against the cache.
    ///
    /// New paths create objects and queue an added event carrying the object
    /// after its first update. Known paths are updated in place, so every
    /// holder of the object (including earlier events) sees the new data; an
    /// object whose data did not change is left untouched. Cached paths missing from
    /// the snapshot are removed and their removal events take ownership of
    /// the objects. Events are ordered by path, additions before removals.
    pub fn apply_snapshot(&mut self, snapshot: ManagedObjects) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        let mut gone: Vec<String> = {
            let present: HashSet<&str> = snapshot.keys().map(String::as_str).collect();
            self.disks
                .keys()
                .chain(self.drives.keys())
                .filter(|path| !present.contains(path.as_str()))
                .cloned()
                .collect()
        };
        gone.sort_unstable();

        let mut entries: Vec<_> = snapshot.into_iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

        for (path, mut interfaces) in entries {
            match self.namespace.classify(&path) {
                Some(ObjectKind::BlockDevice) => match self.disks.get(&path) {
                    Some(disk) => {
                        if disk.update_interfaces(interfaces) {
                            outcome.report.updated += 1;
                        }
                    }
                    None => {
                        let disk = DiskObject::new(path.clone());
                        disk.update_interfaces(interfaces);
                        let disk = Arc::new(disk);
                        self.disks.insert(path, Arc::clone(&disk));
                        outcome.events.push(RegistryEvent::DiskAdded(disk));
                        outcome.report.added += 1;
                    }
                },
                Some(ObjectKind::Drive) => {
                    let properties = interfaces
                        .remove(&self.namespace.drive_interface)
                        .unwrap_or_default();

                    match self.drives.get(&path) {
                        Some(drive) => {
                            if drive.update_properties(properties) {
                                outcome.report.updated += 1;
                            }
                        }
                        None => {
                            let drive = DriveObject::new(path.clone());
                            drive.update_properties(properties);
                            let drive = Arc::new(drive);
                            self.drives.insert(path, Arc::clone(&drive));
                            outcome.events.push(RegistryEvent::DriveAdded(drive));
                            outcome.report.added += 1;
                        }
                    }
                }
                None => {
                    trace!("Ignoring object outside the disk/drive namespace: {path}");
                    outcome.report.ignored += 1;
                }
            }
        }

        for path in gone {
            if let Some(disk) = self.disks.remove(&path) {
                outcome.events.push(RegistryEvent::DiskRemoved(disk));
            } else if let Some(drive) = self.drives.remove(&path) {
                outcome.events.push(RegistryEvent::DriveRemoved(drive));
            }
            outcome.report.removed += 1;
        }

        outcome
    }

    pub fn disk(&self, path: &str) -> Option<Arc<DiskObject>> {
        self.disks.get(path).cloned()
    }

    pub fn drive(&self, path: &str) -> Option<Arc<DriveObject>> {
        self.drives.get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.disks.contains_key(path) || self.drives.contains_key(path)
    }

    /// All cached disks, sorted by object path.
    pub fn disks(&self) -> Vec<Arc<DiskObject>> {
        sorted_values(&self.disks)
    }

    /// All cached drives, sorted by object path.
    pub fn drives(&self) -> Vec<Arc<DriveObject>> {
        sorted_values(&self.drives)
    }

    pub fn disk_count(&self) -> usize {
        self.disks.len()
    }

    pub fn drive_count(&self) -> usize {
        self.drives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty() && self.drives.is_empty()
    }

    /// Disks that no other cached disk lists as one of its partitions.
    pub fn root_disks(&self) -> Vec<Arc<DiskObject>> {
        let mut partitions: HashSet<String> = HashSet::new();
        for (path, disk) in &self.disks {
            partitions.extend(
                disk.partition_paths()
                    .into_iter()
                    .filter(|partition| partition != path),
            );
        }

        let mut roots: Vec<Arc<DiskObject>> = self
            .disks
            .iter()
            .filter(|(path, _)| !partitions.contains(path.as_str()))
            .map(|(_, disk)| Arc::clone(disk))
            .collect();
        roots.sort_unstable_by(|a, b| a.object_path().cmp(b.object_path()));
        roots
    }

    /// Cached disks listed by `path`'s partition table, in table order.
    pub fn partitions_of(&self, path: &str) -> Vec<Arc<DiskObject>> {
        let Some(disk) = self.disks.get(path) else {
            return Vec::new();
        };

        disk.partition_paths()
            .iter()
            .filter_map(|partition| self.disks.get(partition).cloned())
            .collect()
    }

    /// Cached disks whose block interface points at the drive `drive_path`.
    pub fn disks_for_drive(&self, drive_path: &str) -> Vec<Arc<DiskObject>> {
        let mut disks: Vec<Arc<DiskObject>> = self
            .disks
            .values()
            .filter(|disk| disk.drive_path().is_some_and(|drive| drive == drive_path))
            .cloned()
            .collect();
        disks.sort_unstable_by(|a, b| a.object_path().cmp(b.object_path()));
        disks
    }
}

fn sorted_values<T>(map: &HashMap<String, Arc<T>>) -> Vec<Arc<T>> {
    let mut entries: Vec<(&String, &Arc<T>)> = map.iter().collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    entries.into_iter().map(|(_, v)| Arc::clone(v)).collect()
}
