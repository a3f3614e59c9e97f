//! Command-line interface and orchestration for downloads-chart
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate command handler. Output goes through a [`Host`] so the commands can
//! be driven from tests without touching the real terminal or exiting the process.
//!
//! ## Commands
//!
//! - **chart**: Read saved crates.io API responses, build the download chart dataset,
//!   and write it as JSON
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file

mod chart;
mod common;
mod host;
mod init;
mod run;
mod validate;

pub use chart::{ChartArgs, render_chart};
pub use common::{LogLevel, init_logging};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
