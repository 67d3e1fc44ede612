use std::io;

use plag_check_core::{FileMatch, FileReport, ProjectScan, RenderedComparison, ScanStats};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonScanStats {
    pub(crate) candidate_files: u64,
    pub(crate) compared_pairs: u64,
    pub(crate) skipped_unsupported: u64,
    pub(crate) skipped_empty: u64,
    pub(crate) failed_files: u64,
}

impl From<ScanStats> for JsonScanStats {
    fn from(stats: ScanStats) -> Self {
        Self {
            candidate_files: stats.candidate_files,
            compared_pairs: stats.compared_pairs,
            skipped_unsupported: stats.skipped_unsupported,
            skipped_empty: stats.skipped_empty,
            failed_files: stats.failed_files,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonMatch {
    pub(crate) project: String,
    pub(crate) project_title: String,
    pub(crate) file: String,
    pub(crate) ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonFileReport {
    pub(crate) file: String,
    pub(crate) ratio: f64,
    pub(crate) matches: Vec<JsonMatch>,
    pub(crate) failures: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonScan {
    pub(crate) files: Vec<JsonFileReport>,
    pub(crate) failures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) scan_stats: Option<JsonScanStats>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsonComparison {
    pub(crate) ratio: f64,
    pub(crate) first_file: String,
    pub(crate) second_file: String,
}

fn map_match(m: FileMatch) -> JsonMatch {
    JsonMatch {
        project: m.project,
        project_title: m.project_title,
        file: m.file,
        ratio: m.ratio,
    }
}

fn map_file_report(report: FileReport) -> JsonFileReport {
    JsonFileReport {
        file: report.file,
        ratio: report.ratio,
        matches: report.matches.into_iter().map(map_match).collect(),
        failures: report.failures,
    }
}

pub(crate) fn map_scan(scan: ProjectScan, with_stats: bool) -> JsonScan {
    JsonScan {
        files: scan.files.into_iter().map(map_file_report).collect(),
        failures: scan.failures,
        scan_stats: with_stats.then(|| JsonScanStats::from(scan.stats)),
    }
}

impl From<RenderedComparison> for JsonComparison {
    fn from(rendered: RenderedComparison) -> Self {
        Self {
            ratio: rendered.ratio,
            first_file: rendered.first_file,
            second_file: rendered.second_file,
        }
    }
}

pub(crate) fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::other(format!("json encode: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entries_carry_their_failures() {
        let scan = ProjectScan {
            files: vec![FileReport {
                file: "main.py".to_string(),
                ratio: 0.0,
                matches: Vec::new(),
                failures: vec!["/srv/carol".to_string()],
            }],
            failures: vec!["/srv/carol".to_string()],
            stats: ScanStats::default(),
        };
        let value = serde_json::to_value(map_scan(scan, false)).expect("scan serializes");
        assert_eq!(value["files"][0]["failures"][0], "/srv/carol");
        assert_eq!(value["failures"][0], "/srv/carol");
        assert!(value.get("scanStats").is_none());
    }
}
