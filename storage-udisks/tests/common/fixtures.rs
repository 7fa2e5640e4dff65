#![allow(dead_code)]

use storage_udisks::{InterfaceMap, OwnedValue, PropertyMap};
use zbus::zvariant::{ObjectPath, Value};

pub const BLOCK_IFACE: &str = "org.freedesktop.UDisks2.Block";
pub const PARTITION_TABLE_IFACE: &str = "org.freedesktop.UDisks2.PartitionTable";
pub const PARTITION_IFACE: &str = "org.freedesktop.UDisks2.Partition";
pub const DRIVE_IFACE: &str = "org.freedesktop.UDisks2.Drive";

pub fn block_path(name: &str) -> String {
    format!("{}/{name}", storage_udisks::storage_types::BLOCK_DEVICES_PREFIX)
}

pub fn drive_path(name: &str) -> String {
    format!("{}/{name}", storage_udisks::storage_types::DRIVES_PREFIX)
}

fn owned(value: Value<'_>) -> OwnedValue {
    value.try_into().unwrap()
}

fn bytestring(value: &str) -> OwnedValue {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    owned(Value::from(bytes))
}

fn object_path(value: &str) -> OwnedValue {
    owned(Value::from(ObjectPath::try_from(value).unwrap()))
}

fn object_paths(values: &[String]) -> OwnedValue {
    let paths: Vec<ObjectPath<'_>> = values
        .iter()
        .map(|p| ObjectPath::try_from(p.as_str()).unwrap())
        .collect();
    owned(Value::from(paths))
}

/// A block device belonging to `drive` (or to no drive).
pub fn block(device: &str, size: u64, drive: Option<&str>) -> InterfaceMap {
    InterfaceMap::from([(
        BLOCK_IFACE.to_string(),
        PropertyMap::from([
            ("Device".to_string(), bytestring(device)),
            ("PreferredDevice".to_string(), bytestring(device)),
            ("Size".to_string(), OwnedValue::from(size)),
            ("IdLabel".to_string(), owned(Value::from(""))),
            ("Drive".to_string(), object_path(drive.unwrap_or("/"))),
        ]),
    )])
}

pub fn with_partition_table(mut interfaces: InterfaceMap, partitions: &[String]) -> InterfaceMap {
    interfaces.insert(
        PARTITION_TABLE_IFACE.to_string(),
        PropertyMap::from([
            ("Type".to_string(), owned(Value::from("dos"))),
            ("Partitions".to_string(), object_paths(partitions)),
        ]),
    );
    interfaces
}

pub fn with_partition(mut interfaces: InterfaceMap, number: u32, table: &str) -> InterfaceMap {
    interfaces.insert(
        PARTITION_IFACE.to_string(),
        PropertyMap::from([
            ("Number".to_string(), OwnedValue::from(number)),
            ("Table".to_string(), object_path(table)),
        ]),
    );
    interfaces
}

pub fn drive(vendor: &str, model: &str, size: u64) -> InterfaceMap {
    InterfaceMap::from([
        (
            DRIVE_IFACE.to_string(),
            PropertyMap::from([
                ("Vendor".to_string(), owned(Value::from(vendor))),
                ("Model".to_string(), owned(Value::from(model))),
                ("Size".to_string(), OwnedValue::from(size)),
                ("Removable".to_string(), OwnedValue::from(true)),
            ]),
        ),
        (
            "org.freedesktop.UDisks2.Drive.Ata".to_string(),
            PropertyMap::from([("SmartSupported".to_string(), OwnedValue::from(false))]),
        ),
    ])
}
