//! Device and system metadata for an "About this device" settings page:
//! release versions, serial number, forwarded identifiers and a disk-usage
//! model that tells a single storage pool apart from a separate user partition.

pub mod about;
pub mod collectors;
pub mod config;
pub mod models;
pub mod util;

pub use about::AboutSettings;
pub use config::Config;
pub use models::disk_usage::{DiskUsageRow, StorageType};
