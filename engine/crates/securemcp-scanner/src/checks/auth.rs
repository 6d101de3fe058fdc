//! Authentication and transport checks

use super::CheckModule;
use crate::client::HttpClient;
use crate::headers::{SecurityHeaders, TARGET_HEADERS};
use crate::tls::TlsProbe;
use crate::ScanOptions;
use securemcp_core::{CheckKind, Finding, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Authorization schemes probed with a synthetic credential
pub const AUTH_SCHEMES: [&str; 5] = ["Basic", "Bearer", "Digest", "OAuth", "JWT"];

/// Authentication/transport check: TLS, challenge headers, security headers
pub struct AuthCheck {
    client: HttpClient,
}

impl AuthCheck {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Best-effort TLS probe; only HTTPS targets are probed
    pub async fn check_tls(&self, target: &str, timeout: Duration) -> Vec<Finding> {
        TlsProbe::new(timeout)
            .probe(target)
            .await
            .finding()
            .into_iter()
            .collect()
    }

    /// Flag schemes whose 401 response carries no `WWW-Authenticate` challenge.
    ///
    /// Requests that fail are skipped.
    pub async fn check_auth_methods(&self, target: &str, timeout: Duration) -> Vec<Finding> {
        let mut findings = Vec::new();

        for scheme in AUTH_SCHEMES {
            let credential = format!("{} test", scheme);
            let response = match self
                .client
                .get_with_authorization(target, &credential, timeout)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!("Skipping {} auth probe: {}", scheme, e);
                    continue;
                }
            };

            debug!("{} auth probe returned {}", scheme, response.status);
            if response.is_unauthorized() && !response.has_header("WWW-Authenticate") {
                findings.push(Finding::new(format!(
                    "Missing WWW-Authenticate header for {} auth",
                    scheme
                )));
            }
        }

        findings
    }

    /// One GET; a transport failure here fails the whole check
    pub async fn check_security_headers(
        &self,
        target: &str,
        timeout: Duration,
    ) -> Result<Vec<Finding>> {
        let response = self.client.get(target, timeout).await?;
        Ok(SecurityHeaders::missing(&response, &TARGET_HEADERS))
    }
}

#[async_trait::async_trait]
impl CheckModule for AuthCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Authentication
    }

    async fn run(&self, target: &str, options: &ScanOptions) -> Result<Vec<Finding>> {
        let mut findings = self.check_tls(target, options.timeout).await;
        findings.extend(self.check_auth_methods(target, options.timeout).await);
        findings.extend(self.check_security_headers(target, options.timeout).await?);
        Ok(findings)
    }
}
