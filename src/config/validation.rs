//! Validation of hostnames, domain names and host addresses

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// Longest accepted hostname label
pub const MAX_LABEL_LEN: usize = 63;

/// Characters allowed in a hostname label
#[expect(clippy::expect_used, reason = "The pattern is a constant")]
static LABEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]*$").expect("valid label pattern"));

/// Check a single hostname label
///
/// Rejects empty labels, labels longer than 63 characters and labels that
/// start or end with `-`. Otherwise only ASCII letters, digits and `-` are
/// allowed.
#[must_use]
#[inline]
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_LABEL_LEN {
        return false;
    }
    if hostname.starts_with('-') || hostname.ends_with('-') {
        return false;
    }
    LABEL_PATTERN.is_match(hostname)
}

/// Check that every dot-separated label is a valid hostname
#[must_use]
#[inline]
pub fn is_valid_domainname(domainname: &str) -> bool {
    domainname.split('.').all(is_valid_hostname)
}

/// Check a host address as used for servers in the school network
///
/// The address must be dotted-quad IPv4, its first and last octet must not
/// be 0, and no octet may be 255.
#[must_use]
#[inline]
pub fn is_valid_host_ipv4(ip: &str) -> bool {
    let Ok(addr) = ip.parse::<Ipv4Addr>() else {
        return false;
    };
    let octets = addr.octets();
    if octets[0] == 0 || octets[3] == 0 {
        return false;
    }
    octets.iter().all(|&octet| octet <= 254)
}
