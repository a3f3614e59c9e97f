#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! downloads-chart crate
//!
//! Turns raw crates.io download counters (per version and per day, plus the "extra" downloads of
//! versions that are no longer known) into a windowed, multi-series dataset that a line/area
//! chart renderer can draw directly.
//!
//! # Module Organization
//!
//! - [`chart`]: The pure download-history aggregation engine
//! - [`api`]: Adapters from crates.io API responses to the engine's input contract
//! - [`config`]: Chart configuration (window size, palette, styling)
//! - [`commands`]: Command-line interface and orchestration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod api;
pub mod chart;
pub mod commands;
pub mod config;

pub use crate::commands::{Host, run};
