//! Security header presence checks

use crate::client::HttpResponse;
use securemcp_core::Finding;

/// A response header whose absence is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityHeader {
    /// Header name as sent on the wire
    pub name: &'static str,
    /// Short label used in the finding text
    pub label: &'static str,
}

impl SecurityHeader {
    const fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label }
    }

    /// Finding text for this header being absent
    pub fn missing_finding(&self) -> Finding {
        Finding::new(format!("Missing {} header", self.label))
    }
}

pub const HSTS: SecurityHeader = SecurityHeader::new("Strict-Transport-Security", "HSTS");
pub const X_CONTENT_TYPE_OPTIONS: SecurityHeader =
    SecurityHeader::new("X-Content-Type-Options", "X-Content-Type-Options");
pub const X_FRAME_OPTIONS: SecurityHeader =
    SecurityHeader::new("X-Frame-Options", "X-Frame-Options");
pub const X_XSS_PROTECTION: SecurityHeader =
    SecurityHeader::new("X-XSS-Protection", "X-XSS-Protection");
pub const CONTENT_SECURITY_POLICY: SecurityHeader =
    SecurityHeader::new("Content-Security-Policy", "Content-Security-Policy");

/// Headers checked on the scanned target, in reporting order
pub const TARGET_HEADERS: [SecurityHeader; 5] = [
    HSTS,
    X_CONTENT_TYPE_OPTIONS,
    X_FRAME_OPTIONS,
    X_XSS_PROTECTION,
    CONTENT_SECURITY_POLICY,
];

/// Headers checked on a token endpoint
pub const TOKEN_ENDPOINT_HEADERS: [SecurityHeader; 3] =
    [HSTS, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS];

/// Security headers analyzer
pub struct SecurityHeaders;

impl SecurityHeaders {
    /// One finding per header in `expected` that is absent or empty
    pub fn missing(response: &HttpResponse, expected: &[SecurityHeader]) -> Vec<Finding> {
        expected
            .iter()
            .filter(|header| !response.has_header(header.name))
            .map(SecurityHeader::missing_finding)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(headers: &[(&str, &str)]) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
            body: String::new(),
            final_url: "https://mcp.example.com/".into(),
            response_time_ms: 3,
        }
    }

    #[test]
    fn test_all_missing_in_order() {
        let findings = SecurityHeaders::missing(&response(&[]), &TARGET_HEADERS);
        let messages: Vec<&str> = findings.iter().map(|f| f.message()).collect();
        assert_eq!(
            messages,
            vec![
                "Missing HSTS header",
                "Missing X-Content-Type-Options header",
                "Missing X-Frame-Options header",
                "Missing X-XSS-Protection header",
                "Missing Content-Security-Policy header",
            ]
        );
    }

    #[test]
    fn test_present_headers_are_not_reported() {
        let response = response(&[
            ("strict-transport-security", "max-age=63072000"),
            ("x-frame-options", "DENY"),
            ("content-security-policy", "default-src 'self'"),
        ]);
        let findings = SecurityHeaders::missing(&response, &TARGET_HEADERS);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].message(), "Missing X-Content-Type-Options header");
        assert_eq!(findings[1].message(), "Missing X-XSS-Protection header");
    }

    #[test]
    fn test_token_endpoint_subset() {
        let findings = SecurityHeaders::missing(
            &response(&[("x-content-type-options", "nosniff")]),
            &TOKEN_ENDPOINT_HEADERS,
        );
        assert_eq!(findings.len(), 2);
    }
}
