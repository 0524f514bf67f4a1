//! The "About this device" accessors.
//!
//! Nothing is cached: every accessor re-reads the files, mount table and
//! filesystem statistics it needs, so answers track the live system.

use crate::collectors::disk_usage::{self, ROOT};
use crate::collectors::identity::{IdentityProvider, SysfsIdentity};
use crate::collectors::mounts::{MountTableReader, ProcMounts};
use crate::collectors::release::parse_release_file;
use crate::collectors::storage::{StatvfsStorage, StorageInfoProvider};
use crate::config::Config;
use crate::models::about::AboutSnapshot;
use crate::models::disk_usage::DiskUsageRow;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct AboutSettings {
    os_release: PathBuf,
    hw_release: PathBuf,
    serial:     PathBuf,
    candidates: Vec<String>,
    mounts:     Box<dyn MountTableReader>,
    storage:    Box<dyn StorageInfoProvider>,
    identity:   Box<dyn IdentityProvider>,
}

impl AboutSettings {
    /// Wire the live system providers using the configured paths.
    pub fn new(cfg: &Config) -> Self {
        Self::with_providers(
            cfg,
            Box::new(ProcMounts::new(&cfg.paths.mount_table)),
            Box::new(StatvfsStorage),
            Box::new(SysfsIdentity::default()),
        )
    }

    pub fn with_providers(
        cfg:      &Config,
        mounts:   Box<dyn MountTableReader>,
        storage:  Box<dyn StorageInfoProvider>,
        identity: Box<dyn IdentityProvider>,
    ) -> Self {
        Self {
            os_release: cfg.paths.os_release.clone(),
            hw_release: cfg.paths.hw_release.clone(),
            serial:     cfg.paths.serial.clone(),
            candidates: cfg.disk_usage.candidates.clone(),
            mounts,
            storage,
            identity,
        }
    }

    pub fn software_version(&self) -> String {
        release_value(&self.os_release, "VERSION")
    }

    pub fn adaptation_version(&self) -> String {
        release_value(&self.hw_release, "VERSION_ID")
    }

    pub fn serial(&self) -> String {
        if !self.serial.exists() {
            return String::new();
        }
        match std::fs::read(&self.serial) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
            Err(e)    => {
                warn!("cannot read serial file {}: {}", self.serial.display(), e);
                String::new()
            }
        }
    }

    pub fn disk_usage_model(&self) -> Vec<DiskUsageRow> {
        disk_usage::disk_usage_model(self.mounts.as_ref(), self.storage.as_ref(), &self.candidates)
    }

    pub fn total_disk_space(&self) -> u64 {
        self.storage.total_bytes(Path::new(ROOT)).unwrap_or_else(|e| {
            debug!("{:#}", e);
            0
        })
    }

    pub fn available_disk_space(&self) -> u64 {
        self.storage.available_bytes(Path::new(ROOT)).unwrap_or_else(|e| {
            debug!("{:#}", e);
            0
        })
    }

    pub fn imei(&self) -> String {
        self.identity.imei().unwrap_or_default()
    }

    pub fn bluetooth_address(&self) -> String {
        self.identity.bluetooth_address().unwrap_or_default()
    }

    pub fn wlan_mac_address(&self) -> String {
        self.identity.wlan_mac_address().unwrap_or_default()
    }

    pub fn snapshot(&self) -> AboutSnapshot {
        AboutSnapshot {
            software_version:     self.software_version(),
            adaptation_version:   self.adaptation_version(),
            serial:               self.serial(),
            imei:                 self.imei(),
            bluetooth_address:    self.bluetooth_address(),
            wlan_mac_address:     self.wlan_mac_address(),
            total_disk_space:     self.total_disk_space(),
            available_disk_space: self.available_disk_space(),
            disk_usage:           self.disk_usage_model(),
        }
    }
}

fn release_value(path: &Path, key: &str) -> String {
    parse_release_file(path).remove(key).unwrap_or_default()
}
