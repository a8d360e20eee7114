//! IPv4 address with prefix length

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing an `address/prefix` string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CidrError {
    #[error("invalid IPv4 address '{0}'")]
    Address(String),

    #[error("invalid prefix length or netmask '{0}'")]
    Prefix(String),
}

/// An IPv4 host address together with the prefix of its network
///
/// ```
/// use linuxmuster_mail::network::Ipv4Cidr;
///
/// let cidr: Ipv4Cidr = "10.0.0.3/255.255.0.0".parse().unwrap();
/// assert_eq!(cidr.prefix(), 16);
/// assert_eq!(cidr.network().to_string(), "10.0.0.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Cidr {
    address: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Cidr {
    /// Create from an address and a prefix length (0..=32)
    ///
    /// # Errors
    ///
    /// Returns `CidrError::Prefix` if the prefix is longer than 32 bits.
    #[inline]
    pub fn new(address: Ipv4Addr, prefix: u8) -> Result<Self, CidrError> {
        if prefix > 32 {
            return Err(CidrError::Prefix(prefix.to_string()));
        }
        Ok(Self { address, prefix })
    }

    /// The host address as entered
    #[must_use]
    #[inline]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// Prefix length in bits
    #[must_use]
    #[inline]
    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Netmask of the prefix, e.g. `255.255.0.0` for `/16`
    #[must_use]
    #[inline]
    pub const fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from_bits(self.mask_bits())
    }

    /// Network address (host bits cleared)
    #[must_use]
    #[inline]
    pub const fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from_bits(self.address.to_bits() & self.mask_bits())
    }

    /// Broadcast address (host bits set)
    #[must_use]
    #[inline]
    pub const fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from_bits(self.address.to_bits() | !self.mask_bits())
    }

    const fn mask_bits(&self) -> u32 {
        if self.prefix == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix)
        }
    }
}

impl FromStr for Ipv4Cidr {
    type Err = CidrError;

    /// Accepts `a.b.c.d`, `a.b.c.d/len` and `a.b.c.d/netmask`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr_part, prefix_part) = match s.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (s, None),
        };

        let address = addr_part
            .parse::<Ipv4Addr>()
            .map_err(|_| CidrError::Address(addr_part.to_owned()))?;

        let prefix = match prefix_part {
            None => 32,
            Some(text) => parse_prefix(text)?,
        };

        Self::new(address, prefix)
    }
}

impl fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix)
    }
}

fn parse_prefix(text: &str) -> Result<u8, CidrError> {
    if let Ok(len) = text.parse::<u8>() {
        return if len <= 32 {
            Ok(len)
        } else {
            Err(CidrError::Prefix(text.to_owned()))
        };
    }

    let mask = text
        .parse::<Ipv4Addr>()
        .map_err(|_| CidrError::Prefix(text.to_owned()))?
        .to_bits();
    let len = mask.leading_ones();
    // netmask bits must be contiguous
    if mask.checked_shl(len).unwrap_or(0) != 0 {
        return Err(CidrError::Prefix(text.to_owned()));
    }
    u8::try_from(len).map_err(|_| CidrError::Prefix(text.to_owned()))
}
