// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashMap;

use zbus::zvariant;
use zbus_macros::proxy;

/// Raw `GetManagedObjects` reply: `a{oa{sa{sv}}}`
pub type ManagedObjectsReply = HashMap<
    zvariant::OwnedObjectPath,
    HashMap<String, HashMap<String, zvariant::OwnedValue>>,
>;

#[proxy(
    default_service = "org.freedesktop.UDisks2",
    default_path = "/org/freedesktop/UDisks2",
    interface = "org.freedesktop.DBus.ObjectManager"
)]
pub trait UDisks2ObjectManager {
    fn get_managed_objects(&self) -> zbus::Result<ManagedObjectsReply>;

    #[zbus(signal)]
    fn interfaces_added(
        &self,
        object_path: zvariant::OwnedObjectPath,
        interfaces_and_properties: HashMap<String, HashMap<String, zvariant::OwnedValue>>,
    ) -> zbus::Result<()>;

    #[zbus(signal)]
    fn interfaces_removed(
        &self,
        object_path: zvariant::OwnedObjectPath,
        interfaces: Vec<String>,
    ) -> zbus::Result<()>;
}
