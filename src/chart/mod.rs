//! The download-history aggregation engine.
//!
//! [`build_dataset`] turns raw per-version daily download counters into chart-ready series in five steps:
//!
//! 1. A trailing window of UTC calendar-day buckets is built backwards from the injected "now".
//! 2. Download records are summed into the buckets, keyed by version number, and extra downloads go to `"Other"`.
//! 3. The version labels are ordered by version number, with `"Other"` placed in front.
//! 4. Each series is cut back so it starts no earlier than the day before its version (and the crate) existed.
//! 5. The series are reversed and styled by position.
//!
//! The engine is a pure function of its inputs. It never fails: unknown versions, out-of-window dates and
//! malformed version numbers are tolerated and merely counted in [`ChartStats`].
//!
//! # Point order
//!
//! Points in every series are ordered most-recent-first, the order in which the window is built. Renderers
//! place points by their `x` value, so consumers must not rely on ascending order.

mod aggregator;
mod emitter;
mod model;
mod ordering;
mod stats;
mod trim;
mod window;

#[cfg(test)]
mod test_zone;

pub use aggregator::{SeenVersions, aggregate};
pub use emitter::{emit, trailing_average};
pub use model::{
    AveragePoint, ChartInput, ChartSeries, CubicInterpolationMode, Dataset, DownloadRecord, ExtraDownloadRecord, Fill, OTHER_LABEL,
    Point, Series, SeriesStyle, VersionId, VersionMeta,
};
pub use ordering::{LabelOrder, order_labels, parse_loose, sort_by_version};
pub use stats::ChartStats;
pub use trim::{Thresholds, threshold_day, trim};
pub use window::{Bucket, DayWindow, sub_days};

use crate::config::ChartConfig;
use chrono::{DateTime, TimeZone};

const LOG_TARGET: &str = "   chart";

/// Builds the chart dataset for `input` over the `config.window_days` UTC calendar days ending on the UTC day of `now`.
///
/// Days are always UTC days, matching the dates crates.io puts on its records. The timezone of `now` only sets
/// the wall-clock time and offset that every point's `x` carries. Identical arguments always produce identical
/// output.
#[must_use]
pub fn build_dataset<Tz: TimeZone>(input: &ChartInput, now: &DateTime<Tz>, config: &ChartConfig) -> Dataset {
    let mut stats = ChartStats::default();
    let mut window = DayWindow::build(now, config.window_days);

    let seen = aggregate(&mut window, &input.version_downloads, &input.extra_downloads, &input.versions, &mut stats);

    let order = order_labels(seen.labels(), !input.extra_downloads.is_empty());
    stats.unordered_labels = !order.semver_sorted;

    let datasets = emit(&order.labels, &window, &seen, input.crate_created_at.as_ref(), config);

    log::debug!(
        target: LOG_TARGET,
        "Built {} series over {} days ({} unmatched, {} out of window, {} extra out of window)",
        datasets.len(),
        window.len(),
        stats.unmatched_records,
        stats.out_of_window_records,
        stats.out_of_window_extra_records
    );

    Dataset { datasets, stats }
}
