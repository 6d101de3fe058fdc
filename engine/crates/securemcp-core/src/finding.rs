//! Finding definitions - raw evidence from checks and its classified form

use crate::severity::{Severity, VulnerabilityType};
use serde::{Deserialize, Serialize};

/// Unstructured textual evidence of a possible issue, emitted by a check.
///
/// A finding has no identity beyond its text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Finding(String);

impl Finding {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The finding text
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Finding {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for Finding {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

impl AsRef<str> for Finding {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A finding enriched with type, severity and remediation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    #[serde(rename = "type")]
    pub vulnerability_type: VulnerabilityType,
    pub severity: Severity,
    /// The original finding text
    pub description: String,
    /// The scanned target
    pub location: String,
    pub remediation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_is_transparent() {
        let finding = Finding::from("Missing HSTS header");
        assert_eq!(finding.to_string(), "Missing HSTS header");
        assert_eq!(
            serde_json::to_string(&finding).unwrap(),
            "\"Missing HSTS header\""
        );
    }

    #[test]
    fn test_vulnerability_field_names() {
        let vuln = Vulnerability {
            vulnerability_type: VulnerabilityType::General,
            severity: Severity::Low,
            description: "Missing HSTS header".into(),
            location: "https://mcp.example.com".into(),
            remediation: "Review and address the identified security issue".into(),
        };

        let json = serde_json::to_value(&vuln).unwrap();
        assert_eq!(json["type"], "General Vulnerability");
        assert_eq!(json["severity"], "low");
        assert_eq!(json["location"], "https://mcp.example.com");
    }
}
