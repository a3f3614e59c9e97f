//! Chart configuration
//!
//! Configuration is read from a TOML file (`downloads-chart.toml` by default). Every field has a
//! default, and the defaults themselves live in `default_config.toml`, which is embedded into the
//! binary and validated by the build script.

mod color;
#[expect(clippy::module_inception, reason = "the config type lives in a file of the same name")]
mod config;

pub use color::Color;
pub use config::{ChartConfig, DEFAULT_CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML, MAX_TRAILING_AVERAGE_DAYS, MAX_WINDOW_DAYS, PaletteEntry};
