//! `fx` command-line front end.
//!
//! Argument parsing and command execution live here so they can be tested
//! without spawning the binary; `main.rs` only wires them to the process.

pub mod args;
pub mod commands;
mod error;
mod logging;

pub use error::CliError;
pub use logging::init_tracing;
