//! Severity levels and vulnerability types

use serde::{Deserialize, Serialize};

/// Severity level for vulnerabilities
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity, no keyword of a higher tier matched
    #[default]
    Low,
    /// Medium severity, moderate risk
    Medium,
    /// High severity, significant risk
    High,
    /// Critical severity, immediate action required
    Critical,
}

impl Severity {
    /// All severities, most severe first
    pub const DESCENDING: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Lowercase name, as serialized and used for CSS classes
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Capitalized name for headings
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vulnerability category inferred from finding text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VulnerabilityType {
    #[serde(rename = "OAuth Token Vulnerability")]
    OAuthToken,
    #[serde(rename = "Prompt Injection Vulnerability")]
    PromptInjection,
    #[serde(rename = "Authentication Vulnerability")]
    Authentication,
    #[serde(rename = "General Vulnerability")]
    General,
}

impl VulnerabilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnerabilityType::OAuthToken => "OAuth Token Vulnerability",
            VulnerabilityType::PromptInjection => "Prompt Injection Vulnerability",
            VulnerabilityType::Authentication => "Authentication Vulnerability",
            VulnerabilityType::General => "General Vulnerability",
        }
    }
}

impl std::fmt::Display for VulnerabilityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&VulnerabilityType::OAuthToken).unwrap(),
            "\"OAuth Token Vulnerability\""
        );
        let parsed: VulnerabilityType =
            serde_json::from_str("\"General Vulnerability\"").unwrap();
        assert_eq!(parsed, VulnerabilityType::General);
    }
}
