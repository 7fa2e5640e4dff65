// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the object registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("D-Bus error: {0}")]
    DBusError(String),

    #[error("Signal subscription failed: {0}")]
    SubscriptionFailed(String),

    #[error("Snapshot source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Zbus Error")]
    ZbusError(#[from] zbus::Error),
}

impl From<zbus::fdo::Error> for RegistryError {
    fn from(err: zbus::fdo::Error) -> Self {
        RegistryError::DBusError(err.to_string())
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
