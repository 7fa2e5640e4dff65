//! Property bag builders shared by unit tests.

use zbus::zvariant::{ObjectPath, OwnedValue, Value};

use crate::object::{
    BLOCK_IFACE, FILESYSTEM_IFACE, InterfaceMap, PARTITION_IFACE, PARTITION_TABLE_IFACE,
    PropertyMap,
};

pub(crate) const BLOCK_PREFIX: &str = "/org/freedesktop/UDisks2/block_devices";
pub(crate) const DRIVE_PREFIX: &str = "/org/freedesktop/UDisks2/drives";
pub(crate) const DRIVE_IFACE: &str = "org.freedesktop.UDisks2.Drive";

pub(crate) fn block_path(name: &str) -> String {
    format!("{BLOCK_PREFIX}/{name}")
}

pub(crate) fn drive_path(name: &str) -> String {
    format!("{DRIVE_PREFIX}/{name}")
}

pub(crate) fn string(value: &str) -> OwnedValue {
    Value::from(value).try_into().unwrap()
}

pub(crate) fn bytestring(value: &str) -> OwnedValue {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    Value::from(bytes).try_into().unwrap()
}

pub(crate) fn object_path(value: &str) -> OwnedValue {
    Value::from(ObjectPath::try_from(value).unwrap())
        .try_into()
        .unwrap()
}

pub(crate) fn object_paths(values: &[String]) -> OwnedValue {
    let paths: Vec<ObjectPath<'_>> = values
        .iter()
        .map(|p| ObjectPath::try_from(p.as_str()).unwrap())
        .collect();
    Value::from(paths).try_into().unwrap()
}

pub(crate) fn block_properties(device: &str, size: u64) -> PropertyMap {
    PropertyMap::from([
        ("Device".to_string(), bytestring(device)),
        ("PreferredDevice".to_string(), bytestring(device)),
        ("Size".to_string(), OwnedValue::from(size)),
        ("ReadOnly".to_string(), OwnedValue::from(false)),
        ("Drive".to_string(), object_path("/")),
    ])
}

pub(crate) fn block_interfaces(device: &str, size: u64) -> InterfaceMap {
    InterfaceMap::from([(BLOCK_IFACE.to_string(), block_properties(device, size))])
}

/// A whole disk carrying a partition table listing `partitions`.
pub(crate) fn partitioned_disk_interfaces(device: &str, partitions: &[String]) -> InterfaceMap {
    let mut interfaces = block_interfaces(device, 1 << 30);
    interfaces.insert(
        PARTITION_TABLE_IFACE.to_string(),
        PropertyMap::from([
            ("Type".to_string(), string("gpt")),
            ("Partitions".to_string(), object_paths(partitions)),
        ]),
    );
    interfaces
}

pub(crate) fn partition_interfaces(device: &str, number: u32, table: &str) -> InterfaceMap {
    let mut interfaces = block_interfaces(device, 1 << 20);
    interfaces.insert(
        PARTITION_IFACE.to_string(),
        PropertyMap::from([
            ("Number".to_string(), OwnedValue::from(number)),
            ("Offset".to_string(), OwnedValue::from(1_048_576_u64)),
            ("Size".to_string(), OwnedValue::from(1_u64 << 20)),
            ("Name".to_string(), string("primary")),
            ("Type".to_string(), string("0fc63daf-8483-4772-8e79-3d69d8477de4")),
            ("Table".to_string(), object_path(table)),
        ]),
    );
    interfaces.insert(
        FILESYSTEM_IFACE.to_string(),
        PropertyMap::from([(
            "MountPoints".to_string(),
            Value::from(vec![b"/mnt/data\0".to_vec()]).try_into().unwrap(),
        )]),
    );
    interfaces
}

pub(crate) fn drive_properties(vendor: &str, model: &str, size: u64) -> PropertyMap {
    PropertyMap::from([
        ("Vendor".to_string(), string(vendor)),
        ("Model".to_string(), string(model)),
        ("Serial".to_string(), string("S1234567890")),
        ("Revision".to_string(), string("1B2Q")),
        ("Id".to_string(), string(&format!("{vendor}-{model}"))),
        ("Size".to_string(), OwnedValue::from(size)),
        ("ConnectionBus".to_string(), string("usb")),
        ("RotationRate".to_string(), OwnedValue::from(0_i32)),
        ("Removable".to_string(), OwnedValue::from(true)),
        ("Ejectable".to_string(), OwnedValue::from(false)),
        ("MediaRemovable".to_string(), OwnedValue::from(false)),
        ("MediaAvailable".to_string(), OwnedValue::from(true)),
        ("Optical".to_string(), OwnedValue::from(false)),
        ("CanPowerOff".to_string(), OwnedValue::from(true)),
    ])
}

pub(crate) fn drive_interfaces(vendor: &str, model: &str, size: u64) -> InterfaceMap {
    InterfaceMap::from([(
        DRIVE_IFACE.to_string(),
        drive_properties(vendor, model, size),
    )])
}
