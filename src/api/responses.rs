use crate::chart::{ChartInput, DownloadRecord, ExtraDownloadRecord, VersionMeta};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /api/v1/crates/{name}/downloads`, optionally with `?include=versions`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadsResponse {
    pub version_downloads: Vec<DownloadRecord>,

    #[serde(default)]
    pub meta: DownloadsMeta,

    /// Present when the versions were requested alongside the downloads
    #[serde(default)]
    pub versions: Option<Vec<VersionMeta>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DownloadsMeta {
    /// Downloads of versions that are not part of the response, such as deleted ones
    #[serde(default)]
    pub extra_downloads: Vec<ExtraDownloadRecord>,
}

/// `GET /api/v1/crates/{name}/versions`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionsResponse {
    pub versions: Vec<VersionMeta>,
}

/// `GET /api/v1/crates/{name}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CrateResponse {
    #[serde(rename = "crate")]
    pub krate: ApiCrate,

    #[serde(default)]
    pub versions: Option<Vec<VersionMeta>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCrate {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Assembles the engine input from the API responses at hand.
///
/// Versions are taken from the first of `versions`, `krate` and `downloads` that carries a version list.
/// An explicit `crate_created_at` wins over the creation time in `krate`.
#[must_use]
pub fn chart_input(
    downloads: DownloadsResponse,
    versions: Option<VersionsResponse>,
    krate: Option<CrateResponse>,
    crate_created_at: Option<DateTime<Utc>>,
) -> ChartInput {
    let created_at = crate_created_at.or_else(|| krate.as_ref().map(|c| c.krate.created_at));

    let version_list = versions
        .map(|v| v.versions)
        .or_else(|| krate.and_then(|c| c.versions))
        .or(downloads.versions)
        .unwrap_or_default();

    ChartInput {
        version_downloads: downloads.version_downloads,
        extra_downloads: downloads.meta.extra_downloads,
        versions: version_list,
        crate_created_at: created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::from_json;
    use crate::chart::VersionId;

    const DOWNLOADS: &str = r#"{
        "version_downloads": [
            { "id": 1001, "version": 2, "downloads": 50, "date": "2024-06-27" },
            { "id": 1002, "version": 1, "downloads": 100, "date": "2024-06-23" }
        ],
        "meta": {
            "extra_downloads": [ { "date": "2024-06-28", "downloads": 7 } ]
        }
    }"#;

    const VERSIONS: &str = r#"{
        "versions": [
            { "id": 2, "crate": "demo", "num": "2.0.0", "created_at": "2024-06-25T12:00:00+00:00", "yanked": false },
            { "id": 1, "crate": "demo", "num": "1.0.0", "created_at": "2024-06-20T12:00:00.123456+00:00", "yanked": false }
        ],
        "meta": { "total": 2 }
    }"#;

    const CRATE: &str = r#"{
        "crate": { "id": "demo", "name": "demo", "created_at": "2024-06-19T08:00:00Z", "downloads": 150 },
        "versions": [
            { "id": 9, "num": "9.9.9", "created_at": "2024-06-19T08:00:00Z" }
        ],
        "keywords": [],
        "categories": []
    }"#;

    #[test]
    fn test_parse_downloads_ignores_unknown_fields() {
        let response: DownloadsResponse = from_json(DOWNLOADS).unwrap();
        assert_eq!(response.version_downloads.len(), 2);
        assert_eq!(response.version_downloads[0].version_id, VersionId(2));
        assert_eq!(response.version_downloads[1].downloads, 100);
        assert_eq!(response.meta.extra_downloads.len(), 1);
        assert!(response.versions.is_none());
    }

    #[test]
    fn test_missing_meta_means_no_extra_downloads() {
        let response: DownloadsResponse = from_json(r#"{"version_downloads":[]}"#).unwrap();
        assert!(response.meta.extra_downloads.is_empty());
    }

    #[test]
    fn test_parse_versions() {
        let response: VersionsResponse = from_json(VERSIONS).unwrap();
        assert_eq!(response.versions.len(), 2);
        assert_eq!(response.versions[1].num, "1.0.0");
        assert_eq!(response.versions[0].created_at.to_rfc3339(), "2024-06-25T12:00:00+00:00");
    }

    #[test]
    fn test_parse_crate() {
        let response: CrateResponse = from_json(CRATE).unwrap();
        assert_eq!(response.krate.name, "demo");
        assert_eq!(response.krate.created_at.to_rfc3339(), "2024-06-19T08:00:00+00:00");
        assert_eq!(response.versions.unwrap().len(), 1);
    }

    #[test]
    fn test_chart_input_prefers_explicit_versions() {
        let input = chart_input(
            from_json(DOWNLOADS).unwrap(),
            Some(from_json(VERSIONS).unwrap()),
            Some(from_json(CRATE).unwrap()),
            None,
        );

        assert_eq!(input.versions.len(), 2);
        assert_eq!(input.version_downloads.len(), 2);
        assert_eq!(input.extra_downloads.len(), 1);
        assert_eq!(input.crate_created_at.unwrap().to_rfc3339(), "2024-06-19T08:00:00+00:00");
    }

    #[test]
    fn test_chart_input_falls_back_to_crate_versions() {
        let input = chart_input(from_json(DOWNLOADS).unwrap(), None, Some(from_json(CRATE).unwrap()), None);
        assert_eq!(input.versions.len(), 1);
        assert_eq!(input.versions[0].num, "9.9.9");
    }

    #[test]
    fn test_chart_input_falls_back_to_included_versions() {
        let mut downloads: DownloadsResponse = from_json(DOWNLOADS).unwrap();
        let versions: VersionsResponse = from_json(VERSIONS).unwrap();
        downloads.versions = Some(versions.versions);

        let input = chart_input(downloads, None, None, None);
        assert_eq!(input.versions.len(), 2);
        assert!(input.crate_created_at.is_none());
    }

    #[test]
    fn test_explicit_creation_time_wins() {
        let created: DateTime<Utc> = "2020-01-01T00:00:00Z".parse().unwrap();
        let input = chart_input(from_json(DOWNLOADS).unwrap(), None, Some(from_json(CRATE).unwrap()), Some(created));
        assert_eq!(input.crate_created_at, Some(created));
    }
}
