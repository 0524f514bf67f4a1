use anyhow::{Context, Result};
use std::path::Path;

/// Capacity figures for the filesystem holding a path.
pub trait StorageInfoProvider: Send + Sync {
    fn available_bytes(&self, path: &Path) -> Result<u64>;
    fn total_bytes(&self, path: &Path) -> Result<u64>;
}

/// `statvfs(3)`-backed provider; sizes are in fragment-size units like `df`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatvfsStorage;

impl StorageInfoProvider for StatvfsStorage {
    fn available_bytes(&self, path: &Path) -> Result<u64> {
        let stat = statvfs(path)?;
        Ok(stat.blocks_available() as u64 * stat.fragment_size() as u64)
    }

    fn total_bytes(&self, path: &Path) -> Result<u64> {
        let stat = statvfs(path)?;
        Ok(stat.blocks() as u64 * stat.fragment_size() as u64)
    }
}

fn statvfs(path: &Path) -> Result<nix::sys::statvfs::Statvfs> {
    nix::sys::statvfs::statvfs(path).with_context(|| format!("statvfs {}", path.display()))
}
