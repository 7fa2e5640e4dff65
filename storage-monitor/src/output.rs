// SPDX-License-Identifier: GPL-3.0-only

//! Plain-text and JSON rendering of registry contents

use std::fmt::Write;

use serde::Serialize;
use storage_types::{DiskSummary, DriveSummary, RegistryEventKind, RegistryEventRecord};

/// A root disk with the partitions it lists
#[derive(Debug, Clone, Serialize)]
pub struct RootEntry {
    #[serde(flatten)]
    pub disk: DiskSummary,
    pub children: Vec<DiskSummary>,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// One line per event, for streaming.
pub fn event_json(record: &RegistryEventRecord) -> serde_json::Result<String> {
    serde_json::to_string(record)
}

pub fn roots_table(roots: &[RootEntry]) -> String {
    let mut out = String::new();
    for root in roots {
        push_disk_row(&mut out, &root.disk, "");
        for child in &root.children {
            push_disk_row(&mut out, child, "  ");
        }
    }
    out
}

pub fn disks_table(disks: &[DiskSummary]) -> String {
    let mut out = String::new();
    for disk in disks {
        push_disk_row(&mut out, disk, "");
    }
    out
}

fn push_disk_row(out: &mut String, disk: &DiskSummary, indent: &str) {
    let name = format!("{indent}{}", disk.display_name());
    let kind = disk
        .partition_table_type
        .as_deref()
        .or_else(|| (!disk.id_type.is_empty()).then_some(disk.id_type.as_str()))
        .unwrap_or("-");
    let mounts = if disk.mount_points.is_empty() {
        "-".to_string()
    } else {
        disk.mount_points.join(",")
    };
    let _ = writeln!(
        out,
        "{name:<24} {device:<16} {size:>10} {kind:<8} {mounts:<20} {path}",
        device = or_dash(&disk.device),
        size = disk.pretty_size(),
        path = disk.object_path,
    );
}

pub fn drives_table(drives: &[DriveSummary]) -> String {
    let mut out = String::new();
    for drive in drives {
        let _ = writeln!(
            out,
            "{name:<32} {size:>10} {bus:<8} {media:<10} {path}",
            name = drive.display_name(),
            size = drive.pretty_size(),
            bus = or_dash(&drive.connection_bus),
            media = media_label(drive),
            path = drive.object_path,
        );
    }
    out
}

pub fn disk_detail(disk: &DiskSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Object path:     {}", disk.object_path);
    let _ = writeln!(out, "Device:          {}", or_dash(&disk.device));
    let _ = writeln!(out, "Size:            {}", disk.pretty_size());
    let _ = writeln!(out, "Label:           {}", or_dash(&disk.label));
    let _ = writeln!(
        out,
        "Usage:           {} {}",
        or_dash(&disk.id_usage),
        disk.id_type
    );
    let _ = writeln!(
        out,
        "Drive:           {}",
        disk.drive.as_deref().unwrap_or("-")
    );
    if let Some(table) = &disk.partition_table_type {
        let _ = writeln!(out, "Partition table: {table}");
        for partition in &disk.partitions {
            let _ = writeln!(out, "  {partition}");
        }
    }
    if let Some(number) = disk.partition_number {
        let _ = writeln!(out, "Partition:       {number}");
    }
    for mount_point in &disk.mount_points {
        let _ = writeln!(out, "Mounted at:      {mount_point}");
    }
    let _ = writeln!(out, "Interfaces:      {}", disk.interfaces.join(", "));
    out
}

pub fn drive_detail(drive: &DriveSummary) -> String {
    let rotation = match drive.rotation_rate {
        None => "unknown".to_string(),
        Some(0) => "non-rotating".to_string(),
        Some(rpm) => format!("{rpm} rpm"),
    };

    let mut out = String::new();
    let _ = writeln!(out, "Object path:     {}", drive.object_path);
    let _ = writeln!(out, "Name:            {}", drive.display_name());
    let _ = writeln!(out, "Id:              {}", or_dash(&drive.id));
    let _ = writeln!(out, "Serial:          {}", or_dash(&drive.serial));
    let _ = writeln!(out, "Revision:        {}", or_dash(&drive.revision));
    let _ = writeln!(out, "Size:            {}", drive.pretty_size());
    let _ = writeln!(out, "Bus:             {}", or_dash(&drive.connection_bus));
    let _ = writeln!(out, "Rotation:        {rotation}");
    let _ = writeln!(out, "Media:           {}", media_label(drive));
    let _ = writeln!(out, "Ejectable:       {}", yes_no(drive.ejectable));
    let _ = writeln!(out, "Can power off:   {}", yes_no(drive.can_power_off));
    out
}

pub fn event_line(record: &RegistryEventRecord) -> String {
    format!("{:<14} {}", kind_label(record.kind), record.object_path)
}

fn kind_label(kind: RegistryEventKind) -> &'static str {
    match kind {
        RegistryEventKind::DiskAdded => "disk added",
        RegistryEventKind::DriveAdded => "drive added",
        RegistryEventKind::DiskRemoved => "disk removed",
        RegistryEventKind::DriveRemoved => "drive removed",
    }
}

fn media_label(drive: &DriveSummary) -> &'static str {
    if drive.optical {
        "optical"
    } else if drive.media_removable && !drive.media_available {
        "no media"
    } else if drive.removable {
        "removable"
    } else {
        "fixed"
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
