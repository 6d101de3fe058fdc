//! HTML report renderer
//!
//! Produces a self-contained document (inline CSS, no external assets) with
//! a summary block and one block per vulnerability, grouped by severity from
//! critical down to low.

use crate::ScanReport;
use securemcp_core::{Result, Severity, Vulnerability};

/// Render the report as a standalone HTML document
pub fn render(report: &ScanReport) -> Result<String> {
    let mut html = String::new();

    html.push_str(HEADER);
    html.push_str("<body>\n<h1>SecureMCP Scan Report</h1>\n");
    html.push_str(&summary_section(report));

    html.push_str("<h2>Vulnerabilities</h2>\n");
    if report.vulnerabilities.is_empty() {
        html.push_str("<p class=\"empty\">No vulnerabilities found.</p>\n");
    }

    for severity in Severity::DESCENDING {
        let mut group = report.by_severity(severity).peekable();
        if group.peek().is_none() {
            continue;
        }

        html.push_str(&format!(
            "<section class=\"group group-{}\">\n<h3>{} ({})</h3>\n",
            severity.as_str(),
            severity.label(),
            report.summary.count(severity)
        ));
        for vulnerability in group {
            html.push_str(&vulnerability_block(vulnerability));
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    Ok(html)
}

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>SecureMCP Scan Report</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 20px; color: #212121; }
        .summary { margin: 20px 0; padding: 10px; background-color: #f5f5f5; }
        .vulnerability { margin: 10px 0; padding: 10px; border: 1px solid #ddd; border-left-width: 6px; }
        .critical { background-color: #ffebee; border-left-color: #c62828; }
        .high { background-color: #fff3e0; border-left-color: #ef6c00; }
        .medium { background-color: #fffde7; border-left-color: #f9a825; }
        .low { background-color: #e3f2fd; border-left-color: #1565c0; }
        .empty { color: #757575; }
    </style>
</head>
"#;

fn summary_section(report: &ScanReport) -> String {
    let summary = &report.summary;
    format!(
        r#"<div class="summary">
    <h2>Summary</h2>
    <p>Target: {}</p>
    <p>Scan Time: {}</p>
    <p>Total Vulnerabilities: {}</p>
    <p>Critical: {}</p>
    <p>High: {}</p>
    <p>Medium: {}</p>
    <p>Low: {}</p>
</div>
"#,
        html_escape(&report.target),
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC"),
        summary.total_vulnerabilities,
        summary.critical_count,
        summary.high_count,
        summary.medium_count,
        summary.low_count
    )
}

fn vulnerability_block(vulnerability: &Vulnerability) -> String {
    format!(
        r#"<div class="vulnerability {}">
    <h4>{}</h4>
    <p><strong>Severity:</strong> {}</p>
    <p><strong>Description:</strong> {}</p>
    <p><strong>Location:</strong> {}</p>
    <p><strong>Remediation:</strong> {}</p>
</div>
"#,
        vulnerability.severity.as_str(),
        html_escape(vulnerability.vulnerability_type.as_str()),
        vulnerability.severity.as_str(),
        html_escape(&vulnerability.description),
        html_escape(&vulnerability.location),
        html_escape(&vulnerability.remediation)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use securemcp_core::Finding;

    fn report(findings: &[&str]) -> ScanReport {
        let findings: Vec<Finding> = findings.iter().map(|f| Finding::from(*f)).collect();
        ScanReport::build(
            "https://mcp.example.com/?a=1&b=2",
            &findings,
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        )
    }

    #[test]
    fn test_groups_by_descending_severity() {
        let html = render(&report(&[
            "Missing HSTS header",
            "moderate information disclosure",
            "remote code execution via <script>",
        ]))
        .unwrap();

        let critical = html.find("group-critical").unwrap();
        let medium = html.find("group-medium").unwrap();
        let low = html.find("group-low").unwrap();
        assert!(critical < medium && medium < low);
        assert!(!html.contains("group-high"));
        assert_eq!(html.matches("<div class=\"vulnerability ").count(), 3);
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render(&report(&["remote code execution via <script>"])).unwrap();

        assert!(html.contains("remote code execution via &lt;script&gt;"));
        assert!(html.contains("https://mcp.example.com/?a=1&amp;b=2"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_summary_and_empty_report() {
        let html = render(&report(&[])).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p>Total Vulnerabilities: 0</p>"));
        assert!(html.contains("<p>Scan Time: 2024-01-02 03:04:05 UTC</p>"));
        assert!(html.contains("No vulnerabilities found."));
    }
}
