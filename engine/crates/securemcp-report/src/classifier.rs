//! Keyword classification of raw findings
//!
//! Matching is a case-insensitive substring search. Both tables are ordered
//! and the first matching rule wins.

use securemcp_core::{Finding, Severity, Vulnerability, VulnerabilityType};

struct CategoryRule {
    keyword: &'static str,
    vulnerability_type: VulnerabilityType,
    remediation: &'static str,
}

static CATEGORY_RULES: [CategoryRule; 3] = [
    CategoryRule {
        keyword: "token",
        vulnerability_type: VulnerabilityType::OAuthToken,
        remediation: "Implement secure token storage and proper token validation",
    },
    CategoryRule {
        keyword: "prompt",
        vulnerability_type: VulnerabilityType::PromptInjection,
        remediation: "Implement input validation and sanitization for prompts",
    },
    CategoryRule {
        keyword: "authentication",
        vulnerability_type: VulnerabilityType::Authentication,
        remediation: "Implement proper authentication mechanisms and security headers",
    },
];

const GENERAL_REMEDIATION: &str = "Review and address the identified security issue";

static SEVERITY_RULES: [(Severity, &[&str]); 3] = [
    (
        Severity::Critical,
        &["critical", "severe", "exploit", "remote code execution"],
    ),
    (Severity::High, &["high", "serious", "authentication bypass"]),
    (
        Severity::Medium,
        &["medium", "moderate", "information disclosure"],
    ),
];

fn category(lowered: &str) -> Option<&'static CategoryRule> {
    CATEGORY_RULES
        .iter()
        .find(|rule| lowered.contains(rule.keyword))
}

/// Vulnerability type for a finding text
pub fn vulnerability_type(text: &str) -> VulnerabilityType {
    category(&text.to_lowercase())
        .map(|rule| rule.vulnerability_type)
        .unwrap_or(VulnerabilityType::General)
}

/// Severity tier for a finding text; unmatched text is low
pub fn severity(text: &str) -> Severity {
    let lowered = text.to_lowercase();
    SEVERITY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(severity, _)| *severity)
        .unwrap_or(Severity::Low)
}

/// Canned remediation for a finding text
pub fn remediation(text: &str) -> &'static str {
    category(&text.to_lowercase())
        .map(|rule| rule.remediation)
        .unwrap_or(GENERAL_REMEDIATION)
}

/// Classify a finding observed on `location`
pub fn classify(finding: &Finding, location: &str) -> Vulnerability {
    let text = finding.message();
    Vulnerability {
        vulnerability_type: vulnerability_type(text),
        severity: severity(text),
        description: text.to_string(),
        location: location.to_string(),
        remediation: remediation(text).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_without_severity_keyword() {
        let v = classify(&Finding::from("Invalid token format detected"), "t");
        assert_eq!(v.vulnerability_type, VulnerabilityType::OAuthToken);
        assert_eq!(v.severity, Severity::Low);
        assert_eq!(
            v.remediation,
            "Implement secure token storage and proper token validation"
        );
        assert_eq!(v.description, "Invalid token format detected");
        assert_eq!(v.location, "t");
    }

    #[test]
    fn test_type_priority() {
        // token outranks prompt
        assert_eq!(
            vulnerability_type("Prompt injection vulnerability detected: Token manipulation attempt"),
            VulnerabilityType::OAuthToken
        );
        assert_eq!(
            vulnerability_type("Prompt injection vulnerability detected: Role confusion attack attempt"),
            VulnerabilityType::PromptInjection
        );
        assert_eq!(
            vulnerability_type("Weak authentication scheme"),
            VulnerabilityType::Authentication
        );
        assert_eq!(
            vulnerability_type("Missing HSTS header"),
            VulnerabilityType::General
        );
        assert_eq!(
            vulnerability_type("Missing WWW-Authenticate header for Basic auth"),
            VulnerabilityType::General
        );
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(severity("Remote Code Execution possible"), Severity::Critical);
        assert_eq!(severity("critical and high"), Severity::Critical);
        assert_eq!(severity("Authentication bypass"), Severity::High);
        assert_eq!(severity("Information disclosure via banner"), Severity::Medium);
        assert_eq!(severity("Missing X-Frame-Options header"), Severity::Low);
    }

    #[test]
    fn test_remediation_follows_type() {
        assert_eq!(
            remediation("prompt leak"),
            "Implement input validation and sanitization for prompts"
        );
        assert_eq!(
            remediation("AUTHENTICATION disabled"),
            "Implement proper authentication mechanisms and security headers"
        );
        assert_eq!(remediation("Outdated TLS version"), GENERAL_REMEDIATION);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let finding = Finding::from("Token has excessive scope permissions");
        assert_eq!(classify(&finding, "x"), classify(&finding, "x"));
    }
}
