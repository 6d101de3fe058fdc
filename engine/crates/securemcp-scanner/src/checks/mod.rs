//! Check modules run by the scanner

pub mod auth;
pub mod oauth;
pub mod prompt;

pub use auth::AuthCheck;
pub use oauth::{OAuthCheck, PlaceholderInspector, TokenInspector};
pub use prompt::{
    InjectionPayload, InjectionPosition, PlaceholderAnalyzer, PromptInjectionCheck,
    ResponseAnalyzer,
};

use crate::ScanOptions;
use securemcp_core::{CheckKind, Finding, Result};

/// A check module: probes one target and reports raw findings.
///
/// An `Err` aborts the module. Best-effort sub-probes swallow their own
/// failures and simply contribute no findings.
#[async_trait::async_trait]
pub trait CheckModule: Send + Sync {
    /// Which check this module implements
    fn kind(&self) -> CheckKind;

    /// Run the check against `target`
    async fn run(&self, target: &str, options: &ScanOptions) -> Result<Vec<Finding>>;
}
