use super::Host;
use super::common::{LogLevel, init_logging};
use crate::Result;
use crate::api::{self, CrateResponse, DownloadsResponse, VersionsResponse};
use crate::chart::{ChartInput, Dataset, build_dataset};
use crate::config::ChartConfig;
use camino::Utf8PathBuf;
use chrono::{DateTime, FixedOffset, Local, Utc};
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "  command";

#[derive(Parser, Debug)]
pub struct ChartArgs {
    /// Response of `GET /api/v1/crates/{name}/downloads`, saved as JSON
    #[arg(long, value_name = "PATH")]
    pub downloads: Utf8PathBuf,

    /// Response of `GET /api/v1/crates/{name}/versions`, saved as JSON
    #[arg(long, value_name = "PATH")]
    pub versions: Option<Utf8PathBuf>,

    /// Response of `GET /api/v1/crates/{name}`, saved as JSON
    #[arg(long = "crate", value_name = "PATH")]
    pub krate: Option<Utf8PathBuf>,

    /// Creation time of the crate, overriding the one in the crate response
    #[arg(long, value_name = "RFC3339")]
    pub crate_created_at: Option<DateTime<Utc>>,

    /// Reference time for the end of the window; its UTC day is the last day charted [default: the local clock]
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<DateTime<FixedOffset>>,

    /// Number of days in the window, overriding the configuration
    #[arg(long, value_name = "DAYS")]
    pub window_days: Option<u32>,

    /// Path to configuration file (default is `downloads-chart.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Write the dataset to this file instead of to the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Builds the chart dataset from saved API responses and writes it out as JSON
pub fn render_chart<H: Host>(host: &mut H, args: &ChartArgs) -> Result<()> {
    init_logging(args.log_level);

    match render_chart_inner(host, args) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Unable to build the chart: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

fn render_chart_inner<H: Host>(host: &mut H, args: &ChartArgs) -> Result<()> {
    let config = load_config(args)?;
    let input = load_input(args)?;

    let dataset = match args.now {
        Some(now) => build_dataset(&input, &now, &config),
        None => build_dataset(&input, &Local::now(), &config),
    };

    report_stats(host, &dataset);

    let json = serde_json::to_string_pretty(&dataset).into_app_err("serializing the chart dataset")?;

    if let Some(path) = &args.output {
        fs::write(path, format!("{json}\n")).into_app_err_with(|| format!("writing the chart dataset to '{path}'"))?;
        let _ = writeln!(host.output(), "Wrote {} series to {path}", dataset.datasets.len());
    } else {
        writeln!(host.output(), "{json}").into_app_err("writing the chart dataset")?;
    }

    Ok(())
}

fn load_config(args: &ChartArgs) -> Result<ChartConfig> {
    let mut config = ChartConfig::load(&Utf8PathBuf::from("."), args.config.as_ref())?;

    if let Some(days) = args.window_days {
        config.window_days = days;
        config.validate()?;
    }

    Ok(config)
}

fn load_input(args: &ChartArgs) -> Result<ChartInput> {
    let downloads: DownloadsResponse = api::load(&args.downloads)?;
    let versions: Option<VersionsResponse> = args.versions.as_deref().map(api::load).transpose()?;
    let krate: Option<CrateResponse> = args.krate.as_deref().map(api::load).transpose()?;

    log::info!(
        target: LOG_TARGET,
        "Read {} download record(s) and {} extra download record(s)",
        downloads.version_downloads.len(),
        downloads.meta.extra_downloads.len()
    );

    Ok(api::chart_input(downloads, versions, krate, args.crate_created_at))
}

fn report_stats<H: Host>(host: &mut H, dataset: &Dataset) {
    let stats = &dataset.stats;

    if stats.unmatched_records > 0 {
        let _ = writeln!(
            host.error(),
            "⚠️  {} download record(s) referred to versions missing from the version list",
            stats.unmatched_records
        );
    }

    if stats.unordered_labels {
        let _ = writeln!(host.error(), "⚠️  Some version numbers could not be parsed, series are left in input order");
    }
}
