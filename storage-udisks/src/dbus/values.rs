// SPDX-License-Identifier: GPL-3.0-only

//! Decoding of variant values found in UDisks2 property bags.
//!
//! Every helper returns `None` when the value has an unexpected type, so a
//! malformed reply degrades to missing properties.

use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

pub(crate) fn as_string(value: &OwnedValue) -> Option<String> {
    String::try_from(value.clone()).ok()
}

pub(crate) fn as_u64(value: &OwnedValue) -> Option<u64> {
    if let Ok(parsed) = u64::try_from(value.clone()) {
        Some(parsed)
    } else {
        u32::try_from(value.clone()).ok().map(u64::from)
    }
}

pub(crate) fn as_u32(value: &OwnedValue) -> Option<u32> {
    u32::try_from(value.clone()).ok()
}

pub(crate) fn as_i32(value: &OwnedValue) -> Option<i32> {
    i32::try_from(value.clone()).ok()
}

pub(crate) fn as_bool(value: &OwnedValue) -> Option<bool> {
    bool::try_from(value.clone()).ok()
}

/// A single object path; UDisks2 uses `/` for "none".
pub(crate) fn as_object_path(value: &OwnedValue) -> Option<String> {
    let path = match &**value {
        Value::ObjectPath(path) => path.as_str().to_string(),
        Value::Str(path) => path.as_str().to_string(),
        _ => return None,
    };

    if path == "/" { None } else { Some(path) }
}

pub(crate) fn as_object_paths(value: &OwnedValue) -> Option<Vec<String>> {
    let paths: Vec<OwnedObjectPath> = value.clone().try_into().ok()?;
    Some(paths.iter().map(|p| p.as_str().to_string()).collect())
}

pub(crate) fn as_bytestring_list(value: &OwnedValue) -> Option<Vec<Vec<u8>>> {
    value.clone().try_into().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zbus::zvariant::ObjectPath;

    fn owned(value: Value<'_>) -> OwnedValue {
        value.try_into().unwrap()
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(as_u64(&OwnedValue::from(4096_u64)), Some(4096));
        assert_eq!(as_u64(&OwnedValue::from(7_u32)), Some(7));
        assert_eq!(as_u32(&OwnedValue::from(3_u32)), Some(3));
        assert_eq!(as_i32(&OwnedValue::from(7200_i32)), Some(7200));
        assert_eq!(as_bool(&OwnedValue::from(true)), Some(true));
        assert_eq!(as_string(&owned(Value::from("gpt"))), Some("gpt".to_string()));
    }

    #[test]
    fn wrong_types_decode_to_none() {
        assert_eq!(as_bool(&OwnedValue::from(1_u64)), None);
        assert_eq!(as_string(&OwnedValue::from(true)), None);
        assert_eq!(as_object_paths(&OwnedValue::from(1_u32)), None);
    }

    #[test]
    fn decodes_object_paths() {
        let single = owned(Value::from(
            ObjectPath::try_from("/org/freedesktop/UDisks2/drives/d0").unwrap(),
        ));
        assert_eq!(
            as_object_path(&single).as_deref(),
            Some("/org/freedesktop/UDisks2/drives/d0")
        );

        let none = owned(Value::from(ObjectPath::try_from("/").unwrap()));
        assert_eq!(as_object_path(&none), None);

        let list = owned(Value::from(vec![
            ObjectPath::try_from("/org/freedesktop/UDisks2/block_devices/sda1").unwrap(),
            ObjectPath::try_from("/org/freedesktop/UDisks2/block_devices/sda2").unwrap(),
        ]));
        assert_eq!(
            as_object_paths(&list).unwrap(),
            vec![
                "/org/freedesktop/UDisks2/block_devices/sda1",
                "/org/freedesktop/UDisks2/block_devices/sda2"
            ]
        );
    }
}
