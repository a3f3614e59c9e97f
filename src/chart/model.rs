use super::ChartStats;
use crate::config::Color;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Label of the synthetic series that holds downloads of versions outside the known set.
pub const OTHER_LABEL: &str = "Other";

/// crates.io's numeric identifier of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VersionId(pub u64);

/// Downloads of one version on one calendar day.
///
/// Several records for the same (version, day) pair may exist; their counts are summed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DownloadRecord {
    #[serde(rename = "version")]
    pub version_id: VersionId,
    pub date: NaiveDate,
    pub downloads: u64,
}

/// Downloads on one calendar day that belong to versions outside the known set (e.g. deleted versions).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtraDownloadRecord {
    pub date: NaiveDate,
    pub downloads: u64,
}

/// The parts of a published version the chart needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionMeta {
    pub id: VersionId,

    /// Version number, normally a semver string
    pub num: String,

    pub created_at: DateTime<Utc>,
}

/// Everything the engine consumes, apart from the current time and the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartInput {
    pub version_downloads: Vec<DownloadRecord>,
    pub extra_downloads: Vec<ExtraDownloadRecord>,
    pub versions: Vec<VersionMeta>,

    /// When known, no series extends to before the day preceding the crate's creation
    pub crate_created_at: Option<DateTime<Utc>>,
}

/// Downloads on one day. `x` keeps the wall-clock time of the reference "now" on that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: DateTime<FixedOffset>,
    pub y: u64,
}

/// Mean daily downloads over the days preceding `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AveragePoint {
    pub x: DateTime<FixedOffset>,
    pub y: f64,
}

/// One labeled line before styling. Points are ordered most-recent-first.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
    pub average: Vec<AveragePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    Origin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CubicInterpolationMode {
    Default,
    Monotone,
}

/// Presentation attributes of a series, named the way line/area chart renderers expect them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    pub border_width: u32,
    pub cubic_interpolation_mode: CubicInterpolationMode,
    pub fill: Fill,
    pub point_hover_border_width: u32,
    pub point_hover_radius: u32,
}

/// A finished series, ready for the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<Point>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub average: Vec<AveragePoint>,
    #[serde(flatten)]
    pub style: SeriesStyle,
}

/// The engine's output: styled series in drawing order, plus what the fail-soft policies discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub datasets: Vec<ChartSeries>,
    pub stats: ChartStats,
}

impl Dataset {
    /// Labels of all series, in drawing order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|s| s.label.as_str())
    }

    #[must_use]
    pub fn series(&self, label: &str) -> Option<&ChartSeries> {
        self.datasets.iter().find(|s| s.label == label)
    }
}
