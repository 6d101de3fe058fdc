//! Report record and severity summary

use crate::classifier;
use chrono::{DateTime, Utc};
use securemcp_core::{Finding, Severity, Vulnerability};
use serde::{Deserialize, Serialize};

/// Vulnerability counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_vulnerabilities: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
}

impl Summary {
    /// Count vulnerabilities by severity
    pub fn from_vulnerabilities(vulnerabilities: &[Vulnerability]) -> Self {
        let mut summary = Summary {
            total_vulnerabilities: vulnerabilities.len(),
            ..Summary::default()
        };

        for vulnerability in vulnerabilities {
            match vulnerability.severity {
                Severity::Critical => summary.critical_count += 1,
                Severity::High => summary.high_count += 1,
                Severity::Medium => summary.medium_count += 1,
                Severity::Low => summary.low_count += 1,
            }
        }

        summary
    }

    /// Count for one severity tier
    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical_count,
            Severity::High => self.high_count,
            Severity::Medium => self.medium_count,
            Severity::Low => self.low_count,
        }
    }

    /// Total equals the sum of the tier counts
    pub fn is_consistent(&self) -> bool {
        self.critical_count + self.high_count + self.medium_count + self.low_count
            == self.total_vulnerabilities
    }
}

/// Complete scan report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub target: String,
    pub scan_time: DateTime<Utc>,
    /// Check-module order, then emission order
    pub vulnerabilities: Vec<Vulnerability>,
    pub summary: Summary,
}

impl ScanReport {
    /// Classify `findings` against `target` and summarize them
    pub fn build(target: &str, findings: &[Finding], scan_time: DateTime<Utc>) -> Self {
        let vulnerabilities: Vec<Vulnerability> = findings
            .iter()
            .map(|finding| classifier::classify(finding, target))
            .collect();
        let summary = Summary::from_vulnerabilities(&vulnerabilities);

        Self {
            target: target.to_string(),
            scan_time,
            vulnerabilities,
            summary,
        }
    }

    /// Vulnerabilities of one severity, in report order
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &Vulnerability> {
        self.vulnerabilities
            .iter()
            .filter(move |v| v.severity == severity)
    }
}
