//! Builds the final, styled series list.

use super::aggregator::SeenVersions;
use super::trim::trim;
use super::window::DayWindow;
use super::{AveragePoint, ChartSeries, CubicInterpolationMode, Fill, Point, Series, SeriesStyle};
use crate::config::ChartConfig;
use chrono::{DateTime, Utc};

/// Turns each label into a series over the window, trims it, and styles the result.
///
/// Series come out in the reverse of `ordered_labels`, so with labels ordered `["Other", oldest, .., newest]`
/// the newest version is drawn first and takes the first palette entry, and `"Other"` comes last.
#[must_use]
pub fn emit(
    ordered_labels: &[&str],
    window: &DayWindow,
    seen: &SeenVersions<'_>,
    crate_created_at: Option<&DateTime<Utc>>,
    config: &ChartConfig,
) -> Vec<ChartSeries> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut series: Vec<Series> = ordered_labels
        .iter()
        .map(|&label| {
            let column = column(window, label, config.trailing_average_days);
            trim(column, seen.version(label), crate_created_at)
        })
        .collect();

    series.reverse();

    series
        .into_iter()
        .enumerate()
        .map(|(position, s)| ChartSeries {
            label: s.label,
            data: s.points,
            average: s.average,
            style: style(position, config),
        })
        .collect()
}

/// Every day of the window for one label, most recent first
fn column(window: &DayWindow, label: &str, average_days: u32) -> Series {
    let points: Vec<Point> = window
        .iter()
        .map(|bucket| Point {
            x: bucket.date,
            y: bucket.count(label),
        })
        .collect();

    let average = trailing_average(&points, average_days);

    Series {
        label: label.to_string(),
        points,
        average,
    }
}

/// For each point, the mean of the `days` points that precede it in time.
///
/// `points` must be consecutive days, most recent first. Points without a full `days` of history inside
/// the window get no average. Returns nothing when `days` is zero.
#[expect(clippy::cast_precision_loss, reason = "download counts stay far below 2^52")]
#[must_use]
pub fn trailing_average(points: &[Point], days: u32) -> Vec<AveragePoint> {
    let Ok(days) = usize::try_from(days) else {
        return Vec::new();
    };

    if days == 0 {
        return Vec::new();
    }

    points
        .iter()
        .enumerate()
        .filter_map(|(i, point)| {
            let history = points.get(i + 1..=i + days)?;
            let total: u64 = history.iter().map(|p| p.y).fold(0, u64::saturating_add);
            Some(AveragePoint {
                x: point.x,
                y: total as f64 / days as f64,
            })
        })
        .collect()
}

fn style(position: usize, config: &ChartConfig) -> SeriesStyle {
    let colors = config.palette_entry(position);
    SeriesStyle {
        background_color: colors.map(|c| c.background),
        border_color: colors.map(|c| c.border),
        border_width: config.border_width,
        cubic_interpolation_mode: CubicInterpolationMode::Monotone,
        fill: Fill::Origin,
        point_hover_border_width: config.point_hover_border_width,
        point_hover_radius: config.point_hover_radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::aggregator::aggregate;
    use crate::chart::{ChartStats, DownloadRecord, VersionId, VersionMeta};
    use crate::config::Color;
    use chrono::{NaiveDate, TimeDelta};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-30T12:00:00Z").unwrap().with_timezone(&Utc)
    }

    fn points(values: &[u64]) -> Vec<Point> {
        let end = now().fixed_offset();
        values
            .iter()
            .zip(0..)
            .map(|(&y, i)| Point {
                x: end - TimeDelta::days(i),
                y,
            })
            .collect()
    }

    #[test]
    fn test_trailing_average_excludes_current_day() {
        // most recent first: today=100, then 1, 2, 3, 4
        let avg = trailing_average(&points(&[100, 1, 2, 3, 4]), 2);
        assert_eq!(avg.len(), 3);
        assert!((avg[0].y - 1.5).abs() < f64::EPSILON);
        assert!((avg[1].y - 2.5).abs() < f64::EPSILON);
        assert!((avg[2].y - 3.5).abs() < f64::EPSILON);
        assert_eq!(avg[0].x, points(&[0])[0].x);
    }

    #[test]
    fn test_trailing_average_disabled_or_too_long() {
        assert!(trailing_average(&points(&[1, 2, 3]), 0).is_empty());
        assert!(trailing_average(&points(&[1, 2, 3]), 3).is_empty());
        assert!(trailing_average(&[], 7).is_empty());
    }

    #[test]
    fn test_emit_reverses_and_styles() {
        let versions = vec![
            VersionMeta {
                id: VersionId(1),
                num: "1.0.0".to_string(),
                created_at: now() - TimeDelta::days(30),
            },
            VersionMeta {
                id: VersionId(2),
                num: "2.0.0".to_string(),
                created_at: now() - TimeDelta::days(3),
            },
        ];
        let records = vec![
            DownloadRecord {
                version_id: VersionId(2),
                date: NaiveDate::from_ymd_opt(2024, 6, 29).unwrap(),
                downloads: 9,
            },
            DownloadRecord {
                version_id: VersionId(1),
                date: NaiveDate::from_ymd_opt(2024, 6, 29).unwrap(),
                downloads: 4,
            },
        ];

        let config = ChartConfig::default();
        let mut window = DayWindow::build(&now(), 10);
        let mut stats = ChartStats::default();
        let seen = aggregate(&mut window, &records, &[], &versions, &mut stats);

        let out = emit(&["Other", "1.0.0", "2.0.0"], &window, &seen, None, &config);

        let labels: Vec<_> = out.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["2.0.0", "1.0.0", "Other"]);

        assert_eq!(out[0].style.border_color, Some(Color::from_rgb(0x67, 0x00, 0x1f)));
        assert_eq!(out[1].style.border_color, Some(Color::from_rgb(0xb2, 0x18, 0x2b)));
        assert_eq!(out[0].style.fill, Fill::Origin);

        // 2.0.0 was created 2024-06-27, so it starts on 2024-06-26
        assert_eq!(out[0].data.len(), 5);
        assert_eq!(out[1].data.len(), 10);
        assert_eq!(out[2].data.len(), 10);
        assert_eq!(out[0].data.iter().map(|p| p.y).sum::<u64>(), 9);
        assert!(out[2].data.iter().all(|p| p.y == 0));
        assert!(out.iter().all(|s| s.average.is_empty()));
    }

    #[test]
    fn test_emit_empty_window() {
        let config = ChartConfig::default();
        let window = DayWindow::build(&now(), 0);
        let out = emit(&["1.0.0"], &window, &SeenVersions::default(), None, &config);
        assert!(out.is_empty());
    }

    #[test]
    fn test_palette_wraps_around() {
        let config = ChartConfig::default();
        let window = DayWindow::build(&now(), 1);
        let labels: Vec<String> = (0..10).map(|i| format!("{i}.0.0")).collect();
        let label_refs: Vec<&str> = labels.iter().map(String::as_str).collect();

        let out = emit(&label_refs, &window, &SeenVersions::default(), None, &config);

        assert_eq!(out.len(), 10);
        assert_eq!(out[8].style.border_color, out[0].style.border_color);
        assert_eq!(out[9].style.background_color, out[1].style.background_color);
    }
}
