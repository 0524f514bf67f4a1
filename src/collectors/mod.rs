pub mod disk_usage;
pub mod identity;
pub mod mounts;
pub mod release;
pub mod storage;
