//! Ordering of series labels by version number.

use super::OTHER_LABEL;
use crate::Result;
use ohno::{IntoAppError, app_err};
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::sync::LazyLock;

const LOG_TARGET: &str = "   order";

// Tolerates a leading `v` or `=`, surrounding whitespace, leading zeros, and a pre-release tag without its hyphen
static LOOSE_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[v=\s]*(\d+)\.(\d+)\.(\d+)(?:-?([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?\s*$").expect("invalid regex")
});

/// Series labels in the order they are handed to the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOrder<'a> {
    pub labels: Vec<&'a str>,

    /// `false` when a label failed to parse and `labels` kept the input order
    pub semver_sorted: bool,
}

/// Sorts version labels from oldest to newest and puts `"Other"` in front when there are extra downloads.
///
/// If any label is not a version number, the sort is abandoned as a whole and the labels keep their
/// input order; a single odd version must not break the chart.
#[must_use]
pub fn order_labels<'a>(labels: &[&'a str], has_extra: bool) -> LabelOrder<'a> {
    let mut ordered: Vec<&'a str> = labels.iter().copied().filter(|label| !has_extra || *label != OTHER_LABEL).collect();

    let semver_sorted = match sort_by_version(&mut ordered) {
        Ok(()) => true,
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Keeping version labels unsorted: {e}");
            false
        }
    };

    if has_extra {
        ordered.insert(0, OTHER_LABEL);
    }

    LabelOrder { labels: ordered, semver_sorted }
}

/// Sorts `labels` in ascending version order, leaving them untouched if any label fails to parse.
///
/// # Errors
///
/// Returns an error naming the first label that is not a version number
pub fn sort_by_version(labels: &mut [&str]) -> Result<()> {
    let mut parsed = labels
        .iter()
        .map(|&label| parse_loose(label).map(|version| (version, label)))
        .collect::<Result<Vec<_>>>()?;

    parsed.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (slot, (_, label)) in labels.iter_mut().zip(parsed) {
        *slot = label;
    }

    Ok(())
}

/// Parses a version number, accepting the sloppier forms found in the wild.
///
/// # Errors
///
/// Returns an error if `text` cannot be read as a version number
pub fn parse_loose(text: &str) -> Result<Version> {
    let captures = LOOSE_VERSION_REGEX
        .captures(text)
        .ok_or_else(|| app_err!("'{text}' is not a version number"))?;

    let number = |index: usize| -> Result<u64> {
        captures
            .get(index)
            .map_or("", |m| m.as_str())
            .parse::<u64>()
            .into_app_err_with(|| format!("version component out of range in '{text}'"))
    };

    let pre = match captures.get(4) {
        Some(m) => Prerelease::new(m.as_str()).map_err(|e| app_err!("invalid pre-release in '{text}': {e}"))?,
        None => Prerelease::EMPTY,
    };

    let build = match captures.get(5) {
        Some(m) => BuildMetadata::new(m.as_str()).map_err(|e| app_err!("invalid build metadata in '{text}': {e}"))?,
        None => BuildMetadata::EMPTY,
    };

    Ok(Version {
        major: number(1)?,
        minor: number(2)?,
        patch: number(3)?,
        pre,
        build,
    })
}
