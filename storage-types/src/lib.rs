// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for the COSMIC Ext Storage object registry
//!
//! These models carry no D-Bus types, so they can be shared between the
//! registry (storage-udisks) and its consumers (storage-monitor):
//!
//! - `ObjectKind` / `ObjectNamespace` → classification of remote object paths
//! - `DiskSummary` / `DriveSummary` → flat views of cached objects
//! - `RegistryEventKind` / `RegistryEventRecord` → added/removed notifications

pub mod common;
pub mod disk;
pub mod event;
pub mod object;

pub use common::bytes_to_pretty;
pub use disk::{DiskSummary, DriveSummary};
pub use event::{RegistryEventKind, RegistryEventRecord};
pub use object::{
    BLOCK_DEVICES_PREFIX, DRIVE_INTERFACE, DRIVES_PREFIX, ObjectKind, ObjectNamespace, classify,
};
