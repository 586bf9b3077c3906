//! Driver library for network device monitoring
//!
//! This crate provides the core functionality for:
//! - Transport clients (HTTPS, SSH, Telnet, WinRM)
//! - Response classification into the fixed failure taxonomy
//! - Field extraction from semi-structured text and JSON payloads
//! - Result assembly into tables and variable lists
//! - The concrete device drivers and their configuration models

pub mod classify;
pub mod config;
pub mod drivers;
pub mod error;
pub mod extract;
pub mod output;
pub mod transport;

pub use config::{DeviceConfig, DriverParams};
pub use drivers::{Driver, DriverKind, DriverOutput};
pub use error::{DriverError, FailureKind};
pub use output::{Column, Table, Variable};
