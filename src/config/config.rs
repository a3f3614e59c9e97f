use crate::Result;
use crate::config::Color;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the base directory when no explicit path is given
pub const DEFAULT_CONFIG_FILE_NAME: &str = "downloads-chart.toml";

/// Upper bound for `window_days` (roughly ten years of daily buckets)
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Upper bound for `trailing_average_days`
pub const MAX_TRAILING_AVERAGE_DAYS: u32 = 90;

/// Colors for one series position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteEntry {
    /// Line color
    pub border: Color,

    /// Fill color for the area under the line
    pub background: Color,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Number of calendar days in the trailing window, ending today
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Line width of every series
    #[serde(default = "default_border_width")]
    pub border_width: u32,

    /// Radius of a point while hovered
    #[serde(default = "default_point_hover_radius")]
    pub point_hover_radius: u32,

    /// Border width of a point while hovered
    #[serde(default = "default_point_hover_border_width")]
    pub point_hover_border_width: u32,

    /// Number of preceding days averaged into each series' trend line (0 disables the trend line)
    #[serde(default)]
    pub trailing_average_days: u32,

    /// Colors assigned to series by position, reused cyclically when there are more series than entries
    #[serde(default = "default_palette")]
    pub palette: Vec<PaletteEntry>,
}

const fn default_window_days() -> u32 {
    90
}

const fn default_border_width() -> u32 {
    2
}

const fn default_point_hover_radius() -> u32 {
    5
}

const fn default_point_hover_border_width() -> u32 {
    2
}

/// ColorBrewer RdBu diverging palette, dark to light to dark
fn default_palette() -> Vec<PaletteEntry> {
    const fn entry(border: Color, background: Color) -> PaletteEntry {
        PaletteEntry { border, background }
    }

    vec![
        entry(Color::from_rgb(0x67, 0x00, 0x1f), Color::from_rgb(0xd3, 0xb5, 0xbc)),
        entry(Color::from_rgb(0xb2, 0x18, 0x2b), Color::from_rgb(0xea, 0xbd, 0xc0)),
        entry(Color::from_rgb(0xd6, 0x60, 0x4d), Color::from_rgb(0xf3, 0xd0, 0xca)),
        entry(Color::from_rgb(0xf4, 0xa5, 0x82), Color::from_rgb(0xfc, 0xe4, 0xd9)),
        entry(Color::from_rgb(0x92, 0xc5, 0xde), Color::from_rgb(0xde, 0xed, 0xf5)),
        entry(Color::from_rgb(0x43, 0x93, 0xc3), Color::from_rgb(0xc9, 0xde, 0xed)),
        entry(Color::from_rgb(0x21, 0x66, 0xac), Color::from_rgb(0x21, 0x66, 0xac)),
        entry(Color::from_rgb(0x05, 0x30, 0x61), Color::from_rgb(0x05, 0x30, 0x61)),
    ]
}

impl ChartConfig {
    /// Load configuration from a file or use defaults
    ///
    /// When `config_path` is `None`, `downloads-chart.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty or a day count is out of range
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(app_err!("palette must contain at least one entry"));
        }

        if self.window_days > MAX_WINDOW_DAYS {
            return Err(app_err!("window_days must be at most {MAX_WINDOW_DAYS}, got {}", self.window_days));
        }

        if self.trailing_average_days > MAX_TRAILING_AVERAGE_DAYS {
            return Err(app_err!(
                "trailing_average_days must be at most {MAX_TRAILING_AVERAGE_DAYS}, got {}",
                self.trailing_average_days
            ));
        }

        Ok(())
    }

    /// Colors for the series drawn at `position`, cycling through the palette
    #[must_use]
    pub fn palette_entry(&self, position: usize) -> Option<PaletteEntry> {
        if self.palette.is_empty() {
            None
        } else {
            self.palette.get(position % self.palette.len()).copied()
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to ChartConfig")
    }
}
