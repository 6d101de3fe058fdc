//! Configuration management for SecureMCP

use securemcp_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Report formats the report writer understands
pub const SUPPORTED_REPORT_FORMATS: &[&str] = &["json", "html"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scanner settings
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics settings
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Merge with the deployment environment variables.
    ///
    /// Recognized: `REPORT_DIR`, `SCAN_TIMEOUT` (seconds), `LOG_LEVEL`,
    /// `LOG_FORMAT`, `ENABLE_METRICS`.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("REPORT_DIR") {
            self.report.output_dir = val;
        }
        if let Some(val) = lookup("SCAN_TIMEOUT") {
            match val.parse() {
                Ok(n) => self.scanner.timeout_seconds = n,
                Err(_) => warn!("Ignoring SCAN_TIMEOUT={:?}: not a number of seconds", val),
            }
        }
        if let Some(val) = lookup("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Some(val) = lookup("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Some(val) = lookup("ENABLE_METRICS") {
            match parse_bool(&val) {
                Some(enabled) => self.metrics.enabled = enabled,
                None => warn!("Ignoring ENABLE_METRICS={:?}: not a boolean", val),
            }
        }

        self
    }

    /// Reject values the scanner cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.scanner.timeout_seconds == 0 {
            return Err(Error::InvalidConfig {
                key: "scanner.timeout_seconds".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.report.output_dir.trim().is_empty() {
            return Err(Error::InvalidConfig {
                key: "report.output_dir".into(),
                message: "must not be empty".into(),
            });
        }
        for format in &self.report.formats {
            if !SUPPORTED_REPORT_FORMATS.contains(&format.as_str()) {
                return Err(Error::InvalidConfig {
                    key: "report.formats".into(),
                    message: format!("unsupported format: {}", format),
                });
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Scanner-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Request timeout in seconds, shared by every probe
    #[serde(default = "default_scan_timeout")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// User agent sent with every probe
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Seed prompt for injection testing
    #[serde(default = "default_test_prompt")]
    pub test_prompt: String,
}

fn default_scan_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("SecureMCP/{} (Security Scanner)", env!("CARGO_PKG_VERSION"))
}

fn default_test_prompt() -> String {
    String::from("test prompt")
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_scan_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
            test_prompt: default_test_prompt(),
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory reports are written to (created on demand)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Formats written after each scan
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_output_dir() -> String {
    String::from("reports")
}

fn default_formats() -> Vec<String> {
    vec![String::from("json")]
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json, compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_log_format() -> String {
    String::from("pretty")
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Metrics configuration. Carried for deployments; no exporter is wired.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// Builder for constructing Config
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.scanner.timeout_seconds = seconds;
        self
    }

    pub fn test_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.scanner.test_prompt = prompt.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.report.output_dir = dir.into();
        self
    }

    pub fn formats(mut self, formats: Vec<String>) -> Self {
        self.config.report.formats = formats;
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn metrics(mut self, enabled: bool) -> Self {
        self.config.metrics.enabled = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
