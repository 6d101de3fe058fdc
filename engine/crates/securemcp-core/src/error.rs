//! Error types for SecureMCP

use crate::check::CheckKind;
use thiserror::Error;

/// Result type alias using SecureMCP Error
pub type Result<T> = std::result::Result<T, Error>;

/// SecureMCP error types
#[derive(Error, Debug)]
pub enum Error {
    // === Scanning Errors ===
    #[error("{check} scan failed: {message}")]
    CheckFailed { check: CheckKind, message: String },

    #[error("Target unreachable: {target}")]
    TargetUnreachable { target: String },

    #[error("Connection timeout to {target} after {seconds}s")]
    ConnectionTimeout { target: String, seconds: u64 },

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    // === Transport Errors ===
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("SSL/TLS error: {0}")]
    Tls(String),

    // === Report Errors ===
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Render error: {0}")]
    Render(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic ===
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an error raised inside a check module with the module's name
    pub fn check_failed(check: CheckKind, source: impl std::fmt::Display) -> Self {
        Error::CheckFailed {
            check,
            message: source.to_string(),
        }
    }

    /// Check if this error is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::TargetUnreachable { .. }
                | Error::ConnectionTimeout { .. }
                | Error::Transport(_)
                | Error::Tls(_)
        )
    }

    /// Check if this error is fatal (caused by configuration, not by the target)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_)
                | Error::Configuration(_)
                | Error::InvalidConfig { .. }
        )
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::CheckFailed { .. } => "CHECK_FAILED",
            Error::TargetUnreachable { .. } => "TARGET_UNREACHABLE",
            Error::ConnectionTimeout { .. } => "CONNECTION_TIMEOUT",
            Error::InvalidTarget(_) => "INVALID_TARGET",
            Error::Transport(_) => "TRANSPORT_ERROR",
            Error::Tls(_) => "TLS_ERROR",
            Error::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Error::Render(_) => "RENDER_ERROR",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::InvalidConfig { .. } => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
            Error::Other(_) => "OTHER",
        }
    }
}
