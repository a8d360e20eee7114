//! Detection of local network interfaces

use crate::system::System;
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

/// Kernel directory listing one entry per interface
pub const SYS_CLASS_NET: &str = "/sys/class/net";

/// Kernel IPv4 routing table
pub const PROC_NET_ROUTE: &str = "/proc/net/route";

/// Gateway flag of a routing table entry
const RTF_GATEWAY: u32 = 0x2;

/// List the interface names except the loopback, sorted
///
/// # Errors
///
/// Returns an error if the interface directory cannot be read.
pub fn detect_interfaces(system: &dyn System) -> Result<Vec<String>> {
    let entries = system
        .read_dir(Path::new(SYS_CLASS_NET))
        .with_context(|| format!("Failed to list network interfaces in {SYS_CLASS_NET}"))?;

    let mut names: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.file_name().and_then(|name| name.to_str()))
        .filter(|name| *name != "lo")
        .map(str::to_owned)
        .collect();
    names.sort();
    debug!("Detected interfaces: {:?}", names);
    Ok(names)
}

/// Find the interface of the default gateway route in `/proc/net/route` text
///
/// ```
/// use linuxmuster_mail::network::default_route_interface;
///
/// let table = "Iface\tDestination\tGateway\tFlags\n\
///              eth1\t0000000A\t00000000\t0001\n\
///              eth0\t00000000\tFE00000A\t0003\n";
/// assert_eq!(default_route_interface(table), Some("eth0".to_owned()));
/// ```
#[must_use]
pub fn default_route_interface(route_table: &str) -> Option<String> {
    route_table.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (iface, destination, flags) = match fields.as_slice() {
            [iface, destination, _gateway, flags, ..] => (*iface, *destination, *flags),
            _ => return None,
        };
        let flags = u32::from_str_radix(flags, 16).ok()?;
        (destination == "00000000" && flags & RTF_GATEWAY != 0).then(|| iface.to_owned())
    })
}

/// Pick the interface offered as default
///
/// A single detected interface is the default; with several, the one
/// carrying the default route is chosen. Returns `None` when neither
/// applies.
pub fn default_interface(system: &dyn System, interfaces: &[String]) -> Option<String> {
    if let [only] = interfaces {
        return Some(only.clone());
    }

    match system.read_to_string(Path::new(PROC_NET_ROUTE)) {
        Ok(table) => default_route_interface(&table),
        Err(err) => {
            debug!("Cannot read {}: {}", PROC_NET_ROUTE, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    const ROUTES: &str = "\
Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT
eth0\t0000000A\t00000000\t0001\t0\t0\t0\t0000FFFF\t0\t0\t0
eth1\t00000000\tFE00000A\t0003\t0\t0\t0\t00000000\t0\t0\t0
";

    #[test]
    fn test_detect_skips_loopback() {
        let system = MockSystem::new()
            .with_dir("/sys/class/net/lo")
            .unwrap()
            .with_dir("/sys/class/net/eth1")
            .unwrap()
            .with_dir("/sys/class/net/eth0")
            .unwrap();
        let names = detect_interfaces(&system).unwrap();
        assert_eq!(names, vec!["eth0".to_owned(), "eth1".to_owned()]);
    }

    #[test]
    fn test_single_interface_is_default() {
        let system = MockSystem::new();
        let default = default_interface(&system, &["ens18".to_owned()]);
        assert_eq!(default.as_deref(), Some("ens18"));
    }

    #[test]
    fn test_default_route_chooses_among_many() {
        let system = MockSystem::new().with_file(PROC_NET_ROUTE, ROUTES.as_bytes()).unwrap();
        let default = default_interface(&system, &["eth0".to_owned(), "eth1".to_owned()]);
        assert_eq!(default.as_deref(), Some("eth1"));
    }

    #[test]
    fn test_no_default_route() {
        let table = "Iface\tDestination\tGateway\tFlags\neth0\t00000000\t00000000\t0001\n";
        assert_eq!(default_route_interface(table), None);
    }
}
