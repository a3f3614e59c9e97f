use super::Host;
use crate::Result;
use crate::config::{ChartConfig, DEFAULT_CONFIG_FILE_NAME};
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (default is `downloads-chart.toml` in the current directory)
    #[arg(value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

pub fn init_config<H: Host>(host: &mut H, args: &InitArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CONFIG_FILE_NAME));

    ChartConfig::save_default(&output)?;
    let _ = writeln!(host.output(), "Generated default configuration file: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::config::DEFAULT_CONFIG_TOML;
    use std::fs;

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot do file I/O")]
    fn test_init_writes_default_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let path = dir.join("chart.toml");

        let mut host = TestHost::new();
        init_config(&mut host, &InitArgs { output: Some(path.clone()) }).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TOML);
        assert!(host.output_text().contains("chart.toml"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot do file I/O")]
    fn test_init_into_missing_directory_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let mut host = TestHost::new();
        let result = init_config(
            &mut host,
            &InitArgs {
                output: Some(dir.join("no/such/dir/chart.toml")),
            },
        );
        assert!(result.is_err());
    }
}
