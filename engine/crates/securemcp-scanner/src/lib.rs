//! SecureMCP Scanner - Check modules and scan orchestration
//!
//! This crate audits a single MCP-style endpoint:
//! - Timeout-bound HTTP probe client shared by every check
//! - OAuth/token check (format, storage markers, token endpoint)
//! - Prompt injection check (fixed payload catalog)
//! - Authentication/transport check (TLS, auth challenges, security headers)
//!
//! # Example
//!
//! ```no_run
//! use securemcp_scanner::{ScanConfig, Scanner};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScanConfig::default().with_timeout_seconds(10);
//!
//!     let scanner = Scanner::new(config).unwrap();
//!     let findings = scanner.scan("https://mcp.example.com").await.unwrap();
//!
//!     for finding in findings {
//!         println!("[!] {}", finding);
//!     }
//! }
//! ```

pub mod checks;
pub mod client;
pub mod headers;
pub mod tls;

pub use checks::{
    AuthCheck, CheckModule, InjectionPayload, InjectionPosition, OAuthCheck, PlaceholderAnalyzer,
    PlaceholderInspector, PromptInjectionCheck, ResponseAnalyzer, TokenInspector,
};
pub use client::{ClientError, HttpClient, HttpResponse};
pub use headers::{SecurityHeader, SecurityHeaders};
pub use tls::{TlsProbe, TlsVerdict};

use securemcp_core::{CheckKind, Error, Finding, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Seed prompt used when the caller supplies none
pub const DEFAULT_TEST_PROMPT: &str = "test prompt";

/// Probe client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Seed prompt for [`Scanner::scan`]
    pub test_prompt: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: format!("SecureMCP/{} (Security Scanner)", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
            test_prompt: DEFAULT_TEST_PROMPT.to_string(),
        }
    }
}

impl ScanConfig {
    pub fn with_timeout_seconds(mut self, timeout: u64) -> Self {
        self.timeout_seconds = timeout;
        self
    }

    pub fn with_connect_timeout_seconds(mut self, timeout: u64) -> Self {
        self.connect_timeout_seconds = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_test_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.test_prompt = prompt.into();
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Per-scan options. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub scan_oauth: bool,
    pub scan_prompt_injection: bool,
    pub scan_authentication: bool,
    /// Seed prompt the injection payloads are attached to
    pub test_prompt: String,
    /// Applied to every request of the scan
    pub timeout: Duration,
    /// Token to inspect; the target string is used when absent
    pub token: Option<String>,
    /// Token endpoint to validate as part of the OAuth check
    pub token_endpoint: Option<String>,
    pub injection_position: InjectionPosition,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            scan_oauth: true,
            scan_prompt_injection: true,
            scan_authentication: true,
            test_prompt: DEFAULT_TEST_PROMPT.to_string(),
            timeout: Duration::from_secs(30),
            token: None,
            token_endpoint: None,
            injection_position: InjectionPosition::default(),
        }
    }
}

impl ScanOptions {
    /// Options with every module disabled
    pub fn none() -> Self {
        Self {
            scan_oauth: false,
            scan_prompt_injection: false,
            scan_authentication: false,
            ..Self::default()
        }
    }

    /// Whether the module of this kind should run
    pub fn runs(&self, kind: CheckKind) -> bool {
        match kind {
            CheckKind::OAuth => self.scan_oauth,
            CheckKind::PromptInjection => self.scan_prompt_injection,
            CheckKind::Authentication => self.scan_authentication,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_token_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.token_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_test_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.test_prompt = prompt.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Scan orchestrator.
///
/// Runs its modules one after another in registration order. The first
/// module error aborts the scan and discards findings gathered so far.
pub struct Scanner {
    config: ScanConfig,
    modules: Vec<Box<dyn CheckModule>>,
}

impl Scanner {
    /// Create a scanner with the three built-in modules sharing one client
    pub fn new(config: ScanConfig) -> Result<Self> {
        let client = HttpClient::new(&config)?;
        let modules: Vec<Box<dyn CheckModule>> = vec![
            Box::new(OAuthCheck::new(client.clone())),
            Box::new(PromptInjectionCheck::new(client.clone())),
            Box::new(AuthCheck::new(client)),
        ];
        Ok(Self::with_modules(config, modules))
    }

    /// Create a scanner over caller-supplied modules
    pub fn with_modules(config: ScanConfig, modules: Vec<Box<dyn CheckModule>>) -> Self {
        Self { config, modules }
    }

    /// Options used by [`Scanner::scan`]: every module, configured prompt and timeout
    pub fn default_options(&self) -> ScanOptions {
        ScanOptions {
            test_prompt: self.config.test_prompt.clone(),
            timeout: self.config.timeout_duration(),
            ..ScanOptions::default()
        }
    }

    /// Run every module against `target`
    pub async fn scan(&self, target: &str) -> Result<Vec<Finding>> {
        let options = self.default_options();
        self.scan_with_options(target, &options).await
    }

    /// Run the modules selected by `options` against `target`
    pub async fn scan_with_options(
        &self,
        target: &str,
        options: &ScanOptions,
    ) -> Result<Vec<Finding>> {
        let start = Instant::now();
        info!("Starting scan of {}", target);

        let mut findings = Vec::new();

        for module in &self.modules {
            let kind = module.kind();
            if !options.runs(kind) {
                debug!("Skipping {} check", kind);
                continue;
            }

            info!("Running {} check", kind);
            let module_findings = module
                .run(target, options)
                .await
                .map_err(|e| Error::check_failed(kind, e))?;

            debug!("{} check produced {} findings", kind, module_findings.len());
            findings.extend(module_findings);
        }

        info!(
            "Scan complete: {} findings in {}ms",
            findings.len(),
            start.elapsed().as_millis()
        );

        Ok(findings)
    }
}
