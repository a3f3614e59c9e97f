//! Reading API response documents from disk.

use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;

const LOG_TARGET: &str = "     api";

/// Load a JSON document from a file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or does not hold the expected JSON shape
pub fn load<T>(path: &Utf8Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let file = File::open(path).into_app_err_with(|| format!("unable to open file '{path}'"))?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader).into_app_err_with(|| format!("unable to parse file '{path}'"))?;

    log::debug!(target: LOG_TARGET, "Loaded '{path}'");
    Ok(data)
}

/// Parse a JSON document held in memory
///
/// # Errors
///
/// Returns an error if `json` does not hold the expected JSON shape
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_str(json).into_app_err("malformed API response")
}
