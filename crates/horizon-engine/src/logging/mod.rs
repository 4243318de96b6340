//! Logger initialization.
//!
//! The engine logs through the `log` facade only; hosts that install their own
//! logger can skip this module entirely.

mod init;

pub use init::{init_logging, LoggingConfig};
