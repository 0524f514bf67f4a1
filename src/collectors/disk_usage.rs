use crate::collectors::mounts::{MountTable, MountTableReader};
use crate::collectors::storage::StorageInfoProvider;
use crate::models::disk_usage::{DiskUsageRow, StorageType};
use std::path::Path;
use tracing::{debug, warn};

pub const ROOT: &str = "/";

/// Optional mount points reported separately when they live on their own device.
pub const DEFAULT_CANDIDATES: &[&str] = &["/home"];

/// Build the disk-usage rows: `/` first, then every candidate that is mounted
/// on a device other than root's. Candidates keep their configured order,
/// not mount-table order, so the rows are identical across calls.
pub fn disk_usage_model(
    mounts:     &dyn MountTableReader,
    storage:    &dyn StorageInfoProvider,
    candidates: &[String],
) -> Vec<DiskUsageRow> {
    let table = match MountTable::read(mounts) {
        Ok(t)  => t,
        Err(e) => {
            warn!("mount table unavailable, reporting rootfs only: {:#}", e);
            MountTable::default()
        }
    };

    let paths = report_paths(&table, candidates);
    let single = paths.len() == 1;

    paths.iter().map(|path| {
        let storage_type = if single {
            StorageType::Mass
        } else if path == ROOT {
            StorageType::System
        } else {
            StorageType::User
        };
        let available_bytes = query(path, |p| storage.available_bytes(p));
        let total_bytes     = query(path, |p| storage.total_bytes(p));
        debug!("{} ({}): {} of {} bytes available", path, storage_type.label(), available_bytes, total_bytes);
        DiskUsageRow { storage_type, path: path.clone(), available_bytes, total_bytes }
    }).collect()
}

/// Root plus the candidates that are mounted and not backed by root's device.
fn report_paths(table: &MountTable, candidates: &[String]) -> Vec<String> {
    let root_dev = table.device_for(ROOT);
    let mut paths = vec![ROOT.to_string()];

    for candidate in candidates {
        if paths.contains(candidate) { continue; }
        match table.device_for(candidate) {
            Some(dev) if Some(dev) != root_dev => paths.push(candidate.clone()),
            Some(_) => debug!("{} shares the rootfs device, not reported separately", candidate),
            None    => debug!("{} is not a mount point", candidate),
        }
    }
    paths
}

fn query(path: &str, f: impl Fn(&Path) -> anyhow::Result<u64>) -> u64 {
    f(Path::new(path)).unwrap_or_else(|e| {
        warn!("disk space for {} unavailable: {:#}", path, e);
        0
    })
}
