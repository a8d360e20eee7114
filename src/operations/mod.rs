//! Operations module
//!
//! Template rendering, external commands and the two setup flows

pub mod commands;
pub mod mail_setup;
pub mod network_setup;
pub mod render;
pub mod ssh_keys;

pub use commands::*;
pub use mail_setup::*;
pub use network_setup::*;
pub use render::*;
pub use ssh_keys::*;
