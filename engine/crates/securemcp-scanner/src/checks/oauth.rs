//! Bearer token handling checks

use super::CheckModule;
use crate::client::HttpClient;
use crate::headers::{SecurityHeaders, TOKEN_ENDPOINT_HEADERS};
use crate::ScanOptions;
use securemcp_core::{CheckKind, Finding, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const INVALID_TOKEN_FORMAT: &str = "Invalid token format detected";
pub const TOKEN_EXPIRED: &str = "Token is expired or will expire soon";
pub const EXCESSIVE_SCOPE: &str = "Token has excessive scope permissions";
pub const INSECURE_STORAGE: &str = "Token appears to be insecurely stored";
pub const ENDPOINT_NOT_HTTPS: &str = "Token endpoint does not use HTTPS";

/// Client-side storage APIs whose presence in token text implies the token
/// lives in browser-accessible storage. Matched case-sensitively.
pub const INSECURE_STORAGE_PATTERNS: &[&str] = &[
    "localStorage",
    "sessionStorage",
    "document.cookie",
    "window.localStorage",
    "window.sessionStorage",
];

/// Semantic token inspection (expiry and scope)
pub trait TokenInspector: Send + Sync {
    /// Token is expired or close to expiry
    fn is_expired(&self, token: &str) -> bool;

    /// Token grants more scope than it should
    fn has_excessive_scope(&self, token: &str) -> bool;
}

/// Inspector that never reports an issue. No token decoding is performed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderInspector;

impl TokenInspector for PlaceholderInspector {
    fn is_expired(&self, _token: &str) -> bool {
        false
    }

    fn has_excessive_scope(&self, _token: &str) -> bool {
        false
    }
}

/// OAuth/token check
pub struct OAuthCheck {
    client: HttpClient,
    inspector: Arc<dyn TokenInspector>,
}

impl OAuthCheck {
    pub fn new(client: HttpClient) -> Self {
        Self::with_inspector(client, Arc::new(PlaceholderInspector))
    }

    pub fn with_inspector(client: HttpClient, inspector: Arc<dyn TokenInspector>) -> Self {
        Self { client, inspector }
    }

    /// Inspect a token string. Purely local, never fails.
    pub fn scan_token(&self, token: &str) -> Vec<Finding> {
        let mut findings = Vec::new();

        if !is_three_part_token(token) {
            findings.push(Finding::new(INVALID_TOKEN_FORMAT));
        }
        if self.inspector.is_expired(token) {
            findings.push(Finding::new(TOKEN_EXPIRED));
        }
        if self.inspector.has_excessive_scope(token) {
            findings.push(Finding::new(EXCESSIVE_SCOPE));
        }
        if is_insecurely_stored(token) {
            findings.push(Finding::new(INSECURE_STORAGE));
        }

        findings
    }

    /// Check a token endpoint's transport and headers with a HEAD probe.
    ///
    /// A failed probe returns the error; the HTTPS finding is lost with it.
    pub async fn validate_endpoint(
        &self,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();

        if !endpoint.starts_with("https://") {
            findings.push(Finding::new(ENDPOINT_NOT_HTTPS));
        }

        debug!("Probing token endpoint {}", endpoint);
        let response = self.client.head(endpoint, timeout).await?;
        findings.extend(SecurityHeaders::missing(&response, &TOKEN_ENDPOINT_HEADERS));

        Ok(findings)
    }
}

#[async_trait::async_trait]
impl CheckModule for OAuthCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::OAuth
    }

    async fn run(&self, target: &str, options: &ScanOptions) -> Result<Vec<Finding>> {
        let token = options.token.as_deref().unwrap_or(target);
        let mut findings = self.scan_token(token);

        if let Some(endpoint) = options.token_endpoint.as_deref() {
            findings.extend(self.validate_endpoint(endpoint, options.timeout).await?);
        }

        Ok(findings)
    }
}

fn is_three_part_token(token: &str) -> bool {
    token.split('.').count() == 3
}

fn is_insecurely_stored(token: &str) -> bool {
    INSECURE_STORAGE_PATTERNS
        .iter()
        .any(|pattern| token.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScanConfig;

    fn check() -> OAuthCheck {
        OAuthCheck::new(HttpClient::new(&ScanConfig::default()).unwrap())
    }

    struct AlwaysStale;

    impl TokenInspector for AlwaysStale {
        fn is_expired(&self, _token: &str) -> bool {
            true
        }

        fn has_excessive_scope(&self, _token: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_three_part_token_is_clean() {
        assert!(check().scan_token("aaa.bbb.ccc").is_empty());
    }

    #[test]
    fn test_malformed_token() {
        let findings = check().scan_token("https://mcp.example.com");
        assert_eq!(findings, vec![Finding::new(INVALID_TOKEN_FORMAT)]);

        // Empty segments still count
        assert!(check().scan_token("..").is_empty());
        assert_eq!(check().scan_token("a.b.c.d").len(), 1);
    }

    #[test]
    fn test_storage_markers() {
        let findings = check().scan_token("window.localStorage.a.b");
        assert_eq!(
            findings,
            vec![
                Finding::new(INVALID_TOKEN_FORMAT),
                Finding::new(INSECURE_STORAGE)
            ]
        );

        // Matching is case-sensitive
        assert!(check().scan_token("LOCALSTORAGE.b.c").is_empty());
    }

    #[test]
    fn test_custom_inspector_findings_keep_order() {
        let check = OAuthCheck::with_inspector(
            HttpClient::new(&ScanConfig::default()).unwrap(),
            Arc::new(AlwaysStale),
        );
        let findings = check.scan_token("document.cookie");
        let messages: Vec<&str> = findings.iter().map(|f| f.message()).collect();
        assert_eq!(
            messages,
            vec![
                INVALID_TOKEN_FORMAT,
                TOKEN_EXPIRED,
                EXCESSIVE_SCOPE,
                INSECURE_STORAGE
            ]
        );
    }

    #[tokio::test]
    async fn test_run_prefers_explicit_token() {
        let options = ScanOptions {
            token: Some("h.p.s".into()),
            ..ScanOptions::default()
        };
        let findings = check().run("http://mcp.local", &options).await.unwrap();
        assert!(findings.is_empty());

        let findings = check()
            .run("http://mcp.local", &ScanOptions::default())
            .await
            .unwrap();
        assert_eq!(findings, vec![Finding::new(INVALID_TOKEN_FORMAT)]);
    }
}
