use crate::models::about::AboutSnapshot;
use crate::util::human::{fmt_bytes, fmt_pct, or_dash};

/// Render the about page as plain text.
pub fn generate(snap: &AboutSnapshot) -> String {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();

    out.push_str("═══════════════════════════════════════════════\n");
    out.push_str(&format!("  About this device, {}\n", now));
    out.push_str("═══════════════════════════════════════════════\n\n");

    // ── Versions / identifiers ─────────────────────────────────────────
    out.push_str("── Device ─────────────────────────────────────\n");
    out.push_str(&format!("  {:<20} {}\n", "Software version",   or_dash(&snap.software_version)));
    out.push_str(&format!("  {:<20} {}\n", "Adaptation version", or_dash(&snap.adaptation_version)));
    out.push_str(&format!("  {:<20} {}\n", "Serial",             or_dash(&snap.serial)));
    out.push_str(&format!("  {:<20} {}\n", "IMEI",               or_dash(&snap.imei)));
    out.push_str(&format!("  {:<20} {}\n", "Bluetooth address",  or_dash(&snap.bluetooth_address)));
    out.push_str(&format!("  {:<20} {}\n", "WLAN MAC address",   or_dash(&snap.wlan_mac_address)));
    out.push('\n');

    // ── Storage ────────────────────────────────────────────────────────
    out.push_str(&format!("── Storage ({}) ────────────────────────────────\n", snap.disk_usage.len()));
    out.push_str(&format!(
        "  {:<8} {:<20} {:>10} {:>10} {:>7}\n",
        "Type", "Path", "Total", "Avail", "Use%"
    ));
    out.push_str(&format!("  {}\n", "─".repeat(59)));
    for row in &snap.disk_usage {
        out.push_str(&format!(
            "  {:<8} {:<20} {:>10} {:>10} {:>7}\n",
            row.storage_type.label(), row.path,
            fmt_bytes(row.total_bytes), fmt_bytes(row.available_bytes),
            fmt_pct(row.use_pct()),
        ));
    }
    out.push('\n');

    out.push_str("═══════════════════════════════════════════════\n");
    out
}
