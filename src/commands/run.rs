//! Command dispatch logic for downloads-chart

use super::{ChartArgs, InitArgs, ValidateArgs, init_config, render_chart, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "downloads-chart", version, author, long_about = None)]
#[command(about = "Turn crates.io download counters into a chart-ready dataset")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ChartSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChartSubcommand {
    /// Build the per-version download chart from saved API responses
    Chart(Box<ChartArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        ChartSubcommand::Chart(chart_args) => render_chart(host, chart_args),
        ChartSubcommand::Init(init_args) => init_config(host, init_args),
        ChartSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
