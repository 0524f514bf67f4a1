use crate::models::disk_usage::DiskUsageRow;
use serde::Serialize;

/// Everything the about page shows, gathered in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct AboutSnapshot {
    pub software_version:     String,
    pub adaptation_version:   String,
    pub serial:               String,
    pub imei:                 String,
    pub bluetooth_address:    String,
    pub wlan_mac_address:     String,
    pub total_disk_space:     u64,
    pub available_disk_space: u64,
    pub disk_usage:           Vec<DiskUsageRow>,
}
