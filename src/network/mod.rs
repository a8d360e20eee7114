//! Network helpers for the interactive network setup
//!
//! IPv4 prefix arithmetic and detection of the local interfaces.

pub mod cidr;
pub mod interfaces;

pub use cidr::{CidrError, Ipv4Cidr};
pub use interfaces::{default_interface, default_route_interface, detect_interfaces};
