//! Library side of the `surplus` binary: command parsing, configuration and
//! logging setup. Kept separate from `main.rs` so commands can be driven from
//! tests with an in-memory writer.

pub mod cli;
pub mod config;
pub mod tracing_setup;

pub use cli::{Command, SurplusCli};
pub use config::{ConfigError, OutputFormat, SurplusConfig};
