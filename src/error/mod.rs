//! Error handling module
//!
//! Defines the setup error type and its exit codes

pub mod types;

pub use types::*;
