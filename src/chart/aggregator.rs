//! Folds raw download counters into the window's day buckets.

use super::window::DayWindow;
use super::{ChartStats, DownloadRecord, ExtraDownloadRecord, OTHER_LABEL, VersionId, VersionMeta};
use std::collections::HashMap;

const LOG_TARGET: &str = "   aggregate";

/// Version labels that received at least one download record, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct SeenVersions<'a> {
    order: Vec<&'a str>,
    by_label: HashMap<&'a str, &'a VersionMeta>,
}

impl<'a> SeenVersions<'a> {
    #[must_use]
    pub fn labels(&self) -> &[&'a str] {
        &self.order
    }

    /// The version behind a series label, if the label is a version number
    #[must_use]
    pub fn version(&self, label: &str) -> Option<&'a VersionMeta> {
        self.by_label.get(label).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, version: &'a VersionMeta) {
        let label = version.num.as_str();
        if self.by_label.insert(label, version).is_none() {
            self.order.push(label);
        }
    }
}

/// Adds every record to the bucket of its day, keyed by version number, and every extra record to the
/// `"Other"` label.
///
/// Records referring to a version absent from `versions` are dropped, as are records dated outside the
/// window. A version counts as seen once any of its records resolves, whether or not the record's day is
/// inside the window.
pub fn aggregate<'a>(
    window: &mut DayWindow,
    records: &[DownloadRecord],
    extra_records: &[ExtraDownloadRecord],
    versions: &'a [VersionMeta],
    stats: &mut ChartStats,
) -> SeenVersions<'a> {
    let versions_by_id: HashMap<VersionId, &VersionMeta> = versions.iter().map(|v| (v.id, v)).collect();
    let mut seen = SeenVersions::default();

    for record in records {
        let Some(&version) = versions_by_id.get(&record.version_id) else {
            log::debug!(target: LOG_TARGET, "Dropping downloads of unknown version id {} on {}", record.version_id.0, record.date);
            stats.unmatched_records += 1;
            continue;
        };

        seen.insert(version);

        if !window.add(record.date, &version.num, record.downloads) {
            stats.out_of_window_records += 1;
        }
    }

    for record in extra_records {
        if !window.add(record.date, OTHER_LABEL, record.downloads) {
            stats.out_of_window_extra_records += 1;
        }
    }

    if stats.unmatched_records > 0 {
        log::debug!(
            target: LOG_TARGET,
            "{} download record(s) referred to versions missing from the version list",
            stats.unmatched_records
        );
    }

    seen
}
