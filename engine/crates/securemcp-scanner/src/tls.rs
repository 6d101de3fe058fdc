//! TLS handshake probe
//!
//! Certificate verification is disabled: the probe only cares whether the
//! server negotiates at least TLS 1.2 and whether the handshake trips over
//! the certificate itself.

use crate::client::error_chain;
use native_tls::Protocol;
use securemcp_core::Finding;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;
use url::Url;

pub const INVALID_CERTIFICATE: &str = "Invalid SSL certificate";
pub const OUTDATED_TLS_VERSION: &str = "Outdated TLS version";

/// Outcome of probing a target's TLS endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsVerdict {
    /// Handshake succeeded at TLS 1.2 or above
    Modern,
    /// Server only completes a handshake below TLS 1.2
    Outdated,
    /// Handshake failed on the certificate
    InvalidCertificate,
    /// Target is not HTTPS or the probe could not complete
    Inconclusive,
}

impl TlsVerdict {
    /// The finding this verdict contributes, if any
    pub fn finding(&self) -> Option<Finding> {
        match self {
            TlsVerdict::Outdated => Some(Finding::new(OUTDATED_TLS_VERSION)),
            TlsVerdict::InvalidCertificate => Some(Finding::new(INVALID_CERTIFICATE)),
            TlsVerdict::Modern | TlsVerdict::Inconclusive => None,
        }
    }

    /// Verdict from the modern handshake and, if it was attempted, the
    /// legacy (TLS 1.0 to 1.1) retry
    fn from_handshakes(
        modern: Result<(), String>,
        legacy: Option<Result<(), String>>,
    ) -> Self {
        match (modern, legacy) {
            (Ok(()), _) => TlsVerdict::Modern,
            (Err(message), _) if is_certificate_error(&message) => {
                debug!("TLS certificate rejected: {}", message);
                TlsVerdict::InvalidCertificate
            }
            (Err(_), Some(Ok(()))) => TlsVerdict::Outdated,
            (Err(_), Some(Err(legacy))) => {
                debug!("Legacy TLS handshake failed: {}", legacy);
                TlsVerdict::Inconclusive
            }
            (Err(_), None) => TlsVerdict::Inconclusive,
        }
    }
}

/// Best-effort TLS probe. Never fails; errors collapse into a verdict.
#[derive(Debug, Clone)]
pub struct TlsProbe {
    timeout: Duration,
}

impl TlsProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Probe the TLS endpoint behind `target`
    pub async fn probe(&self, target: &str) -> TlsVerdict {
        let url = match Url::parse(target) {
            Ok(url) if url.scheme() == "https" => url,
            _ => return TlsVerdict::Inconclusive,
        };
        let Some(host) = url.host_str() else {
            return TlsVerdict::Inconclusive;
        };
        let port = url.port_or_known_default().unwrap_or(443);

        debug!("Probing TLS for {}:{}", host, port);

        let modern = self.handshake(host, port, Protocol::Tlsv12, None).await;
        let legacy = match &modern {
            Err(message) if !is_certificate_error(message) => {
                debug!("Modern TLS handshake failed: {}", message);
                Some(
                    self.handshake(host, port, Protocol::Tlsv10, Some(Protocol::Tlsv11))
                        .await,
                )
            }
            _ => None,
        };

        TlsVerdict::from_handshakes(modern, legacy)
    }

    async fn handshake(
        &self,
        host: &str,
        port: u16,
        min: Protocol,
        max: Option<Protocol>,
    ) -> Result<(), String> {
        let connector = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .min_protocol_version(Some(min))
            .max_protocol_version(max)
            .build()
            .map_err(|e| error_chain(&e))?;
        let connector = tokio_native_tls::TlsConnector::from(connector);

        let addr = format!("{}:{}", host, port);
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| format!("connect to {} timed out", addr))?
            .map_err(|e| error_chain(&e))?;

        tokio::time::timeout(self.timeout, connector.connect(host, stream))
            .await
            .map_err(|_| format!("handshake with {} timed out", addr))?
            .map(|_| ())
            .map_err(|e| error_chain(&e))
    }
}

fn is_certificate_error(message: &str) -> bool {
    message.to_lowercase().contains("certificate")
}
