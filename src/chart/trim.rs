//! Cuts series down to the days on which they mean something.

use super::{Series, VersionMeta};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// The earliest day worth charting for something created at `created_at`: the day before its creation.
#[must_use]
pub fn threshold_day(created_at: &DateTime<Utc>) -> NaiveDate {
    let day = created_at.date_naive();
    day.pred_opt().unwrap_or(day)
}

/// Lower bounds on the days a series may cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub version: Option<NaiveDate>,
    pub krate: Option<NaiveDate>,
}

impl Thresholds {
    #[must_use]
    pub fn new(version: Option<&VersionMeta>, crate_created_at: Option<&DateTime<Utc>>) -> Self {
        Self {
            version: version.map(|v| threshold_day(&v.created_at)),
            krate: crate_created_at.map(threshold_day),
        }
    }

    /// Whether `day` is on or after every threshold that applies
    #[must_use]
    pub fn admits(&self, day: NaiveDate) -> bool {
        self.version.is_none_or(|t| day >= t) && self.krate.is_none_or(|t| day >= t)
    }
}

/// Drops the points (and trend points) dated before the version's or the crate's threshold day.
///
/// Points are compared by the UTC calendar day of their `x`, the same kind of day as the thresholds,
/// whatever offset `x` carries. Labels without version metadata, like `"Other"`, are only limited by the
/// crate threshold. Without either, the series is returned unchanged.
#[must_use]
pub fn trim(mut series: Series, version: Option<&VersionMeta>, crate_created_at: Option<&DateTime<Utc>>) -> Series {
    let thresholds = Thresholds::new(version, crate_created_at);
    series.points.retain(|p| thresholds.admits(utc_day(&p.x)));
    series.average.retain(|p| thresholds.admits(utc_day(&p.x)));
    series
}

fn utc_day(x: &DateTime<FixedOffset>) -> NaiveDate {
    x.with_timezone(&Utc).date_naive()
}
