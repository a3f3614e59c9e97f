//! The trailing window of calendar-day buckets.

use crate::config::MAX_WINDOW_DAYS;
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Offset, TimeDelta, TimeZone, Utc};
use std::collections::HashMap;

const LOG_TARGET: &str = "  window";

/// Download counts of every series on one calendar day.
#[derive(Debug, Clone)]
pub struct Bucket {
    /// UTC calendar day, the same kind of day crates.io stamps on its download records; the bucket's key
    pub day: NaiveDate,

    /// The reference "now" moved back by as many days, keeping its wall-clock time
    pub date: DateTime<FixedOffset>,

    counts: HashMap<String, u64>,
}

impl Bucket {
    /// Downloads counted for `label` on this day (zero when none were recorded)
    #[must_use]
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    fn add(&mut self, label: &str, downloads: u64) {
        if let Some(count) = self.counts.get_mut(label) {
            *count = count.saturating_add(downloads);
        } else {
            let _ = self.counts.insert(label.to_owned(), downloads);
        }
    }
}

/// One bucket per UTC calendar day, ending on the UTC day of the reference "now".
///
/// Buckets are stored most-recent-first, and that order carries through to the emitted points.
/// Renderers place points by their `x` value, so nothing downstream may assume ascending order.
/// Lookups by day go through an index rather than relying on map ordering.
#[derive(Debug, Clone, Default)]
pub struct DayWindow {
    buckets: Vec<Bucket>,
    index: HashMap<NaiveDate, usize>,
}

impl DayWindow {
    /// Builds `days` buckets: the UTC day of `now`, then each day before it.
    ///
    /// Bucket keys step back one UTC calendar day at a time, so the window always holds `days` distinct,
    /// consecutive days. The `date` of each bucket is `now` moved back with [`sub_days`], which keeps the
    /// wall-clock time of `now` in its own timezone.
    ///
    /// A window of zero days is empty. Callers are expected to keep `days` within [`MAX_WINDOW_DAYS`]
    /// (see `ChartConfig::validate`); longer windows are still built, but only that many buckets are
    /// reserved up front.
    pub fn build<Tz: TimeZone>(now: &DateTime<Tz>, days: u32) -> Self {
        let capacity = usize::try_from(days.min(MAX_WINDOW_DAYS)).unwrap_or_default();
        let mut window = Self {
            buckets: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        };

        let today = now.with_timezone(&Utc).date_naive();

        for offset in 0..days {
            let (Some(date), Some(day)) = (sub_days(now, offset), today.checked_sub_days(Days::new(u64::from(offset)))) else {
                log::warn!(target: LOG_TARGET, "Window truncated to {offset} days, date arithmetic left the supported range");
                break;
            };

            let _ = window.index.insert(day, window.buckets.len());
            window.buckets.push(Bucket {
                day,
                date: date.fixed_offset(),
                counts: HashMap::new(),
            });
        }

        window
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets, most recent day first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Bucket> + ExactSizeIterator {
        self.buckets.iter()
    }

    #[must_use]
    pub fn get(&self, day: NaiveDate) -> Option<&Bucket> {
        self.index.get(&day).and_then(|&i| self.buckets.get(i))
    }

    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.index.contains_key(&day)
    }

    /// Adds `downloads` to the count of `label` on `day`.
    ///
    /// Returns `false`, leaving the window untouched, when `day` lies outside the window.
    pub fn add(&mut self, day: NaiveDate, label: &str, downloads: u64) -> bool {
        match self.index.get(&day).and_then(|&i| self.buckets.get_mut(i)) {
            Some(bucket) => {
                bucket.add(label, downloads);
                true
            }
            None => false,
        }
    }
}

/// Moves `date` back by `days` calendar days, keeping its wall-clock time in `date`'s timezone.
///
/// Subtracting a multiple of 24 hours lands on a different wall-clock time when a daylight-saving
/// transition lies in between, which can push the result onto a neighboring calendar day. The
/// difference between the two UTC offsets is added back so that only the calendar day changes.
///
/// Returns `None` if the result is outside the range `chrono` can represent.
pub fn sub_days<Tz: TimeZone>(date: &DateTime<Tz>, days: u32) -> Option<DateTime<Tz>> {
    let original_offset = date.offset().fix().local_minus_utc();
    let shifted = date.clone().checked_sub_signed(TimeDelta::days(i64::from(days)))?;
    let shifted_offset = shifted.offset().fix().local_minus_utc();

    let dst_diff = original_offset - shifted_offset;
    if dst_diff == 0 {
        Some(shifted)
    } else {
        shifted.checked_add_signed(TimeDelta::seconds(i64::from(dst_diff)))
    }
}
