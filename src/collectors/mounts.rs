use crate::models::mount::MountEntry;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Source of currently mounted filesystems. Every call reads the live table.
pub trait MountTableReader: Send + Sync {
    fn list_mounts(&self) -> Result<Vec<MountEntry>>;
}

/// Reads an mntent-format table such as `/proc/self/mounts` or `/etc/mtab`.
#[derive(Debug, Clone)]
pub struct ProcMounts {
    path: PathBuf,
}

impl ProcMounts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcMounts {
    fn default() -> Self {
        Self::new("/proc/self/mounts")
    }
}

impl MountTableReader for ProcMounts {
    fn list_mounts(&self) -> Result<Vec<MountEntry>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading mount table {}", self.path.display()))?;
        Ok(parse_mounts(&content))
    }
}

/// Parse `fsname dir type opts freq passno` lines, in table order.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    let mut v = Vec::new();
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 { continue; }
        if fields[0].starts_with('#') { continue; }
        v.push(MountEntry::new(unescape_octal(fields[1]), unescape_octal(fields[0])));
    }
    v
}

/// Decode the `\ooo` escapes the kernel writes for space, tab, newline and backslash.
fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && is_octal_triplet(&bytes[i + 1..i + 4]) {
            let val = (bytes[i + 1] - b'0') * 64 + (bytes[i + 2] - b'0') * 8 + (bytes[i + 3] - b'0');
            out.push(val);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_triplet(b: &[u8]) -> bool {
    b.len() == 3
        && (b'0'..=b'3').contains(&b[0])
        && (b'0'..=b'7').contains(&b[1])
        && (b'0'..=b'7').contains(&b[2])
}

/// Mountpoint → backing device, built from one read of the table.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    devices: HashMap<String, String>,
}

impl MountTable {
    /// Later entries for the same mountpoint replace earlier ones (the top of a mount stack).
    pub fn from_entries(entries: impl IntoIterator<Item = MountEntry>) -> Self {
        let mut devices = HashMap::new();
        for e in entries {
            devices.insert(e.mountpoint, e.device);
        }
        Self { devices }
    }

    pub fn read(reader: &dyn MountTableReader) -> Result<Self> {
        Ok(Self::from_entries(reader.list_mounts()?))
    }

    pub fn device_for(&self, mountpoint: &str) -> Option<&str> {
        self.devices.get(mountpoint).map(String::as_str)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
/dev/mmcblk0p28 / ext4 rw,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0
/dev/mmcblk0p28 /home ext4 rw,relatime 0 0
tmpfs /run tmpfs rw,nosuid,nodev,mode=755 0 0
/dev/mapper/sailfish-home /home ext4 rw,relatime 0 0
";

    #[test]
    fn parses_in_table_order() {
        let entries = parse_mounts(SAMPLE);
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0], MountEntry::new("/", "/dev/mmcblk0p28"));
        assert_eq!(entries[3], MountEntry::new("/run", "tmpfs"));
    }

    #[test]
    fn last_entry_for_mountpoint_wins() {
        let table = MountTable::from_entries(parse_mounts(SAMPLE));
        assert_eq!(table.device_for("/home"), Some("/dev/mapper/sailfish-home"));
        assert_eq!(table.device_for("/"), Some("/dev/mmcblk0p28"));
        assert_eq!(table.device_for("/media"), None);
    }

    #[test]
    fn decodes_octal_escapes() {
        let entries = parse_mounts("/dev/sdb1 /media/My\\040Card vfat rw 0 0\nback\\134slash /mnt/x ext4 rw 0 0\n");
        assert_eq!(entries[0].mountpoint, "/media/My Card");
        assert_eq!(entries[1].device, "back\\slash");
    }

    #[test]
    fn keeps_incomplete_escapes_verbatim() {
        let entries = parse_mounts("dev /mnt/a\\04 ext4 rw 0 0\ndev /mnt/b\\ ext4 rw 0 0\n");
        assert_eq!(entries[0].mountpoint, "/mnt/a\\04");
        assert_eq!(entries[1].mountpoint, "/mnt/b\\");
    }

    #[test]
    fn skips_short_and_comment_lines() {
        let entries = parse_mounts("\nlonely\n# /dev/sda1 / ext4\n/dev/sda1 /\n");
        assert_eq!(entries, vec![MountEntry::new("/", "/dev/sda1")]);
    }

    #[test]
    fn proc_mounts_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        let table = MountTable::read(&ProcMounts::new(f.path())).unwrap();
        assert_eq!(table.device_for("/run"), Some("tmpfs"));
    }

    #[test]
    fn proc_mounts_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ProcMounts::new(dir.path().join("mounts")).list_mounts().is_err());
    }
}
