use std::path::{Path, PathBuf};
use std::process::Command;

/// Device identifiers forwarded as-is to the about page.
pub trait IdentityProvider: Send + Sync {
    fn imei(&self) -> Option<String>;
    fn bluetooth_address(&self) -> Option<String>;
    fn wlan_mac_address(&self) -> Option<String>;
}

/// Identifiers read from sysfs and `hciconfig`. IMEI needs a modem stack and is never reported.
#[derive(Debug, Clone)]
pub struct SysfsIdentity {
    net_class: PathBuf,
}

impl SysfsIdentity {
    pub fn new(net_class: impl Into<PathBuf>) -> Self {
        Self { net_class: net_class.into() }
    }
}

impl Default for SysfsIdentity {
    fn default() -> Self {
        Self::new("/sys/class/net")
    }
}

impl IdentityProvider for SysfsIdentity {
    fn imei(&self) -> Option<String> {
        None
    }

    fn bluetooth_address(&self) -> Option<String> {
        let out = Command::new("hciconfig").arg("hci0").output().ok()?;
        if !out.status.success() { return None; }
        parse_bd_address(&String::from_utf8_lossy(&out.stdout))
    }

    fn wlan_mac_address(&self) -> Option<String> {
        wlan_address(&self.net_class)
    }
}

/// First interface (by name) with a `wireless` directory.
fn wlan_address(net_class: &Path) -> Option<String> {
    let mut ifaces: Vec<PathBuf> = std::fs::read_dir(net_class).ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("wireless").is_dir())
        .collect();
    ifaces.sort();

    ifaces.iter().find_map(|iface| {
        std::fs::read_to_string(iface.join("address"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// "\tBD Address: 00:1A:7D:DA:71:13  ACL MTU: 310:10  SCO MTU: 64:8"
fn parse_bd_address(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("BD Address:")?;
        rest.split_whitespace().next().map(str::to_string)
    })
}
