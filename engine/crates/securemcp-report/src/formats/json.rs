//! JSON report renderer

use crate::ScanReport;
use securemcp_core::Result;

/// Pretty-printed JSON encoding of the full report
pub fn render(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
