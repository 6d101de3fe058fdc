//! SecureMCP - Security auditing tool for MCP applications
//!
//! Entry point for the `securemcp` binary.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use securemcp_common::{init_logging_with_config, Config, LogConfig, LogFormat};
use securemcp_report::ReportGenerator;
use securemcp_scanner::{ScanConfig, ScanOptions, Scanner};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// SecureMCP Scanner
#[derive(Parser, Debug)]
#[command(name = "securemcp")]
#[command(version)]
#[command(about = "Security auditing tool for MCP applications", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides config
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (pretty, json, compact); overrides config
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan an MCP server for vulnerabilities
    Scan(ScanArgs),

    /// List saved reports
    Reports {
        /// Report directory (overrides config and REPORT_DIR)
        #[arg(long)]
        report_dir: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Target URL of the MCP server
    target: String,

    /// Token to inspect (defaults to the target string)
    #[arg(long)]
    token: Option<String>,

    /// Token endpoint to validate
    #[arg(long)]
    token_endpoint: Option<String>,

    /// Seed prompt for injection testing
    #[arg(long)]
    prompt: Option<String>,

    /// Request timeout in seconds (overrides config and SCAN_TIMEOUT)
    #[arg(long)]
    timeout: Option<u64>,

    /// Skip the OAuth/token check
    #[arg(long)]
    skip_oauth: bool,

    /// Skip the prompt injection check
    #[arg(long)]
    skip_prompt: bool,

    /// Skip the authentication/transport check
    #[arg(long)]
    skip_auth: bool,

    /// Report format to write (json, html); repeatable
    #[arg(short, long = "format")]
    formats: Vec<String>,

    /// Report directory (overrides config and REPORT_DIR)
    #[arg(long)]
    report_dir: Option<String>,

    /// Print findings without writing a report
    #[arg(long)]
    no_report: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    }
    .merge_env();

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    let log_format: LogFormat = config.logging.format.parse()?;
    init_logging_with_config(
        LogConfig::new()
            .level(&config.logging.level)
            .format(log_format),
    )?;

    debug!("SecureMCP {}", env!("CARGO_PKG_VERSION"));
    if config.metrics.enabled {
        info!("Metrics enabled; no exporter is configured for the CLI");
    }

    match cli.command {
        Command::Scan(args) => run_scan(config, args).await,
        Command::Reports { report_dir } => {
            if let Some(dir) = report_dir {
                config.report.output_dir = dir;
            }
            list_reports(&config)
        }
    }
}

async fn run_scan(mut config: Config, args: ScanArgs) -> Result<()> {
    if let Some(timeout) = args.timeout {
        config.scanner.timeout_seconds = timeout;
    }
    if let Some(prompt) = &args.prompt {
        config.scanner.test_prompt = prompt.clone();
    }
    if let Some(dir) = &args.report_dir {
        config.report.output_dir = dir.clone();
    }
    if !args.formats.is_empty() {
        config.report.formats = args.formats.clone();
    }
    config.validate()?;

    let scan_config = ScanConfig::default()
        .with_timeout_seconds(config.scanner.timeout_seconds)
        .with_connect_timeout_seconds(config.scanner.connect_timeout_seconds)
        .with_user_agent(&config.scanner.user_agent)
        .with_test_prompt(&config.scanner.test_prompt);

    let options = ScanOptions {
        scan_oauth: !args.skip_oauth,
        scan_prompt_injection: !args.skip_prompt,
        scan_authentication: !args.skip_auth,
        test_prompt: config.scanner.test_prompt.clone(),
        timeout: Duration::from_secs(config.scanner.timeout_seconds),
        token: args.token,
        token_endpoint: args.token_endpoint,
        ..ScanOptions::default()
    };

    println!("[+] Scanning Target: {}", args.target);

    let scanner = Scanner::new(scan_config)?;
    let findings = scanner
        .scan_with_options(&args.target, &options)
        .await
        .context("Error scanning target")?;

    for finding in &findings {
        println!("[!] {}", finding);
    }

    if args.no_report {
        return Ok(());
    }

    let generator = ReportGenerator::new(&config.report.output_dir);
    let report = generator.build_report(&args.target, &findings);
    for format in &config.report.formats {
        let path = generator
            .save(&report, format)
            .with_context(|| format!("Failed to save {} report", format))?;
        println!("[+] Report saved: {}", path.display());
    }

    Ok(())
}

fn list_reports(config: &Config) -> Result<()> {
    let generator = ReportGenerator::new(&config.report.output_dir);
    let reports = generator.list_reports()?;

    if reports.is_empty() {
        println!("No reports found in {}", generator.output_dir().display());
        return Ok(());
    }

    for path in reports {
        println!("{}", path.display());
    }

    Ok(())
}
