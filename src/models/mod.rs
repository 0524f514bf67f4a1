pub mod about;
pub mod disk_usage;
pub mod mount;
