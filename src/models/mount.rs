/// One record of the mount table: where something is mounted and what backs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub mountpoint: String,   // "/home"
    pub device:     String,   // "/dev/mmcblk0p28", "tmpfs", "server:/export"
}

impl MountEntry {
    pub fn new(mountpoint: impl Into<String>, device: impl Into<String>) -> Self {
        Self { mountpoint: mountpoint.into(), device: device.into() }
    }
}
