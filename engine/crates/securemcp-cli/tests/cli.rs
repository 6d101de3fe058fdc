use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: [&str; 6] = [
    "REPORT_DIR",
    "SCAN_TIMEOUT",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "ENABLE_METRICS",
    "RUST_LOG",
];

fn securemcp() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_securemcp"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.arg("--log-level").arg("error");
    cmd
}

/// Target with no security headers that answers 401 without a challenge
async fn bare_target() -> MockServer {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;
    mock
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scan_prints_findings_and_saves_reports() {
    let mock = bare_target().await;
    let dir = tempdir().unwrap();
    let report_dir = dir.path().join("reports");

    let target = mock.uri();
    let out = report_dir.clone();
    let output = tokio::task::spawn_blocking(move || {
        securemcp()
            .arg("scan")
            .arg(&target)
            .arg("--report-dir")
            .arg(&out)
            .arg("--format")
            .arg("json")
            .arg("--format")
            .arg("html")
            .arg("--timeout")
            .arg("5")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "[+] Scanning Target: {}",
            mock.uri()
        )))
        .stdout(predicate::str::contains("[!] Invalid token format detected"))
        .stdout(predicate::str::contains(
            "[!] Missing WWW-Authenticate header for JWT auth",
        ))
        .stdout(predicate::str::contains("[!] Missing HSTS header"));

    let mut names: Vec<String> = fs::read_dir(&report_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("scan_") && names[0].ends_with(".html"));
    assert!(names[1].starts_with("scan_") && names[1].ends_with(".json"));

    let json = fs::read_to_string(report_dir.join(&names[1])).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["summary"]["total_vulnerabilities"], 11);

    let vulnerabilities = report["vulnerabilities"].as_array().unwrap();
    let missing_headers: Vec<&serde_json::Value> = vulnerabilities
        .iter()
        .filter(|v| {
            v["description"]
                .as_str()
                .map(|d| d.starts_with("Missing ") && d.ends_with(" header"))
                .unwrap_or(false)
        })
        .collect();
    assert_eq!(missing_headers.len(), 5);
    for v in missing_headers {
        assert_eq!(v["type"], "General Vulnerability");
        assert_eq!(v["severity"], "low");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_scan_with_skipped_modules_and_no_report() {
    let mock = bare_target().await;
    let dir = tempdir().unwrap();

    let target = mock.uri();
    let out = dir.path().to_path_buf();
    let output = tokio::task::spawn_blocking(move || {
        securemcp()
            .arg("scan")
            .arg(&target)
            .arg("--skip-prompt")
            .arg("--skip-auth")
            .arg("--token")
            .arg("header.payload.signature")
            .arg("--report-dir")
            .arg(&out)
            .arg("--no-report")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("[!]").not());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unreachable_target_exits_non_zero() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let target = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let dir = tempdir().unwrap();

    securemcp()
        .arg("scan")
        .arg(&target)
        .arg("--report-dir")
        .arg(dir.path())
        .arg("--timeout")
        .arg("2")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[+] Scanning Target:"))
        .stdout(predicate::str::contains("[!]").not())
        .stderr(predicate::str::contains("Authentication scan failed"));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unsupported_format_is_rejected() {
    let dir = tempdir().unwrap();

    securemcp()
        .arg("scan")
        .arg("http://127.0.0.1:9")
        .arg("--report-dir")
        .arg(dir.path().join("reports"))
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported format: xml"));

    assert!(!dir.path().join("reports").exists());
}

#[test]
fn test_reports_listing() {
    let dir = tempdir().unwrap();

    securemcp()
        .arg("reports")
        .arg("--report-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No reports found"));

    fs::write(dir.path().join("scan_2024_01_01_00_00_00.json"), b"{}").unwrap();

    securemcp()
        .arg("reports")
        .arg("--report-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("scan_2024_01_01_00_00_00.json"));
}
