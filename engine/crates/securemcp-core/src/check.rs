//! Check module identifiers

use serde::{Deserialize, Serialize};

/// The independent probe categories a scan is composed of.
///
/// Declaration order is the default execution order of a full scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Bearer-token format and storage checks
    OAuth,
    /// Adversarial payload submission
    PromptInjection,
    /// TLS, auth challenge and security header probes
    Authentication,
}

impl CheckKind {
    /// All check kinds in default execution order
    pub const ALL: [CheckKind; 3] = [
        CheckKind::OAuth,
        CheckKind::PromptInjection,
        CheckKind::Authentication,
    ];

    /// Short identifier used in logs and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::OAuth => "oauth",
            CheckKind::PromptInjection => "prompt_injection",
            CheckKind::Authentication => "authentication",
        }
    }

    /// Human-readable name, used as the prefix of module errors
    pub fn display_name(&self) -> &'static str {
        match self {
            CheckKind::OAuth => "OAuth",
            CheckKind::PromptInjection => "Prompt injection",
            CheckKind::Authentication => "Authentication",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        assert_eq!(
            CheckKind::ALL,
            [
                CheckKind::OAuth,
                CheckKind::PromptInjection,
                CheckKind::Authentication
            ]
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(CheckKind::OAuth.to_string(), "OAuth");
        assert_eq!(CheckKind::PromptInjection.as_str(), "prompt_injection");
    }
}
