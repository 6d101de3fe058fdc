//! SecureMCP Report - Finding classification and report persistence
//!
//! - Keyword classifier turning raw findings into typed vulnerabilities
//! - `ScanReport` with a severity summary
//! - JSON and HTML renderers
//! - `ReportGenerator` writing reports atomically into an output directory

pub mod classifier;
pub mod formats;
pub mod report;

pub use classifier::classify;
pub use formats::ReportFormat;
pub use report::{ScanReport, Summary};

use chrono::{DateTime, Utc};
use securemcp_core::{Error, Finding, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp layout embedded in report filenames
pub const FILENAME_TIME_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// Builds reports and writes them under one output directory
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Build a report timestamped now
    pub fn build_report(&self, target: &str, findings: &[Finding]) -> ScanReport {
        self.build_report_at(target, findings, Utc::now())
    }

    /// Build a report with an explicit timestamp
    pub fn build_report_at(
        &self,
        target: &str,
        findings: &[Finding],
        scan_time: DateTime<Utc>,
    ) -> ScanReport {
        ScanReport::build(target, findings, scan_time)
    }

    /// File name a report is saved under for `format`
    pub fn file_name(report: &ScanReport, format: ReportFormat) -> String {
        format!(
            "scan_{}.{}",
            report.scan_time.format(FILENAME_TIME_FORMAT),
            format.extension()
        )
    }

    /// Render and write `report` in `format` ("json" or "html").
    ///
    /// The format is validated before anything touches the filesystem. The
    /// report is written to a temporary file and renamed into place, so a
    /// failed write never leaves a partial report behind.
    pub fn save(&self, report: &ScanReport, format: &str) -> Result<PathBuf> {
        let format: ReportFormat = format.parse()?;

        let content = match format {
            ReportFormat::Json => formats::json::render(report)?,
            ReportFormat::Html => formats::html::render(report)?,
        };

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::Configuration(format!(
                "Cannot create report directory {:?}: {}",
                self.output_dir, e
            ))
        })?;

        let path = self.output_dir.join(Self::file_name(report, format));
        debug!("Writing {} report to {:?}", format, path);

        let mut tmp = tempfile::Builder::new()
            .prefix(".scan_")
            .suffix(".tmp")
            .tempfile_in(&self.output_dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| Error::Io(e.error))?;

        info!("Saved {} report to {}", format, path.display());
        Ok(path)
    }

    /// Saved reports in the output directory, oldest first.
    ///
    /// A missing directory yields an empty list.
    pub fn list_reports(&self) -> Result<Vec<PathBuf>> {
        let entries = match std::fs::read_dir(&self.output_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reports = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if is_report_file(&path) {
                reports.push(path);
            }
        }

        // Timestamped names sort chronologically
        reports.sort();
        Ok(reports)
    }
}

fn is_report_file(path: &Path) -> bool {
    let is_known_format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ReportFormat::from_extension)
        .is_some();
    let has_prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("scan_"))
        .unwrap_or(false);

    path.is_file() && is_known_format && has_prefix
}
