//! crates.io API response shapes
//!
//! The engine consumes a [`ChartInput`](crate::chart::ChartInput); the types here describe the JSON
//! documents crates.io returns and turn them into that input. Fields the chart does not need are ignored.
//! Nothing here performs HTTP requests.

mod document;
mod responses;

pub use document::{from_json, load};
pub use responses::{ApiCrate, CrateResponse, DownloadsMeta, DownloadsResponse, VersionsResponse, chart_input};
