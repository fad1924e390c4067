//! Resident memory probe.

const STATUS_PATH: &str = "/proc/self/status";
const KIB_PER_MIB: f64 = 1024.0;

/// Returns the resident set size of this process in MiB.
///
/// Reads `VmRSS` from `/proc/self/status`; returns `None` where that file is
/// unavailable.
#[must_use]
pub fn resident_memory_mib() -> Option<f64> {
    let status = std::fs::read_to_string(STATUS_PATH).ok()?;
    parse_vm_rss_mib(&status)
}

fn parse_vm_rss_mib(status: &str) -> Option<f64> {
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kib: u32 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(f64::from(kib) / KIB_PER_MIB)
}
