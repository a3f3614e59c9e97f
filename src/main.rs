//! Turns crates.io download counters into a chart-ready dataset.
//!
//! ```bash
//! curl -s https://crates.io/api/v1/crates/serde/downloads > downloads.json
//! curl -s https://crates.io/api/v1/crates/serde/versions > versions.json
//! curl -s https://crates.io/api/v1/crates/serde > crate.json
//! downloads-chart chart --downloads downloads.json --versions versions.json --crate crate.json
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use downloads_chart::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that talks to the real terminal.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args())
}
