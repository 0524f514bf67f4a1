use serde::Serialize;

/// How a reported storage pool is presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    /// Root filesystem when a separate user partition exists.
    System,
    /// Any non-root partition reported alongside root.
    User,
    /// The only pool on the device: root holds everything.
    Mass,
}

impl StorageType {
    pub fn label(&self) -> &'static str {
        match self {
            StorageType::System => "system",
            StorageType::User   => "user",
            StorageType::Mass   => "mass",
        }
    }
}

/// One row of the disk-usage model, one per reported mount point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiskUsageRow {
    #[serde(rename = "storageType")]
    pub storage_type: StorageType,
    pub path:         String,
    #[serde(rename = "available")]
    pub available_bytes: u64,
    #[serde(rename = "total")]
    pub total_bytes:     u64,
}

impl DiskUsageRow {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    pub fn use_pct(&self) -> f64 {
        if self.total_bytes == 0 { return 0.0; }
        self.used_bytes() as f64 / self.total_bytes as f64 * 100.0
    }
}
