use crate::collectors::disk_usage::DEFAULT_CANDIDATES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub disk_usage: DiskUsageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Release file holding the software `VERSION`
    pub os_release: PathBuf,
    /// Release file holding the hardware adaptation `VERSION_ID`
    pub hw_release: PathBuf,
    /// Plain-text serial number file
    pub serial: PathBuf,
    /// mntent-format mount table
    pub mount_table: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskUsageConfig {
    /// Mount points reported separately from `/` when backed by another device.
    pub candidates: Vec<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            os_release:  "/etc/os-release".into(),
            hw_release:  "/etc/hw-release".into(),
            serial:      "/config/serial/serial.txt".into(),
            mount_table: "/proc/self/mounts".into(),
        }
    }
}

impl Default for DiskUsageConfig {
    fn default() -> Self {
        Self { candidates: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect() }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the per-user config, writing defaults on first run.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        match Self::load_from(&path) {
            Ok(c)  => c,
            Err(e) => {
                debug!("using default config: {:#}", e);
                if !path.exists() {
                    // Best-effort; a read-only home is fine.
                    let _ = try_write_defaults(&path);
                }
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let cfg: Config = toml::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aboutinfo").join("aboutinfo.toml"))
    }
}

fn try_write_defaults(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# aboutinfo configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}
