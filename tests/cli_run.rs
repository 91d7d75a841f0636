use assert_cmd::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

fn journey_audit() -> Command {
    let mut cmd = Command::cargo_bin("journey-audit").expect("binary built");
    cmd.env_remove("RUST_LOG")
        .env_remove("JOURNEY_AUDIT_LIGHTHOUSE_BIN")
        .env_remove("JOURNEY_AUDIT_CHROME_PORT");
    cmd
}

#[cfg(unix)]
fn fake_lighthouse(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("lighthouse");
    std::fs::write(
        &script,
        r#"#!/bin/sh
base=""
for arg in "$@"; do
  case "$arg" in
    --output-path=*) base="${arg#--output-path=}" ;;
    --form-factor=mobile) echo "mobile run crashed" >&2; exit 3 ;;
  esac
done
printf '{"categories":{"performance":{"score":0.9},"seo":{"score":1}}}' > "$base.report.json"
printf '<html>report</html>' > "$base.report.html"
"#,
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[test]
fn config_show_prints_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let assert = journey_audit()
        .args(["config", "show", "--config", missing.to_str().unwrap()])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("# source: defaults"));
    assert!(stdout.contains("best-practices"));
    assert!(stdout.contains("output_format: html"));
}

#[test]
fn run_requires_a_url() {
    journey_audit().arg("run").assert().failure();
}

#[cfg(unix)]
#[test]
fn run_writes_one_row_per_successful_context() {
    let dir = tempfile::tempdir().unwrap();
    let lighthouse = fake_lighthouse(dir.path());
    let config = dir.path().join("journey-audit.yaml");
    std::fs::write(
        &config,
        r#"
audit:
  categories: [performance, seo]
contexts: [desktop, mobile]
lighthouse:
  context_args:
    mobile: ["--form-factor=mobile"]
"#,
    )
    .unwrap();
    let csv = dir.path().join("scores.csv");
    let reports = dir.path().join("reports");
    let metrics = dir.path().join("metrics.prom");

    journey_audit()
        .env("JOURNEY_AUDIT_LIGHTHOUSE_BIN", &lighthouse)
        .args([
            "run",
            "--config",
            config.to_str().unwrap(),
            "--url",
            "https://example.com/",
            "--csv",
            csv.to_str().unwrap(),
            "--report-dir",
            reports.to_str().unwrap(),
            "--metrics",
            metrics.to_str().unwrap(),
        ])
        .assert()
        .success();

    let text = std::fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Url,Context,Performance,SEO");
    assert_eq!(lines[1], "https://example.com/,desktop,0.9,1.0");
    assert_eq!(lines.len(), 2);

    let report = reports.join("1-example.com-desktop.html");
    assert_eq!(
        std::fs::read_to_string(report).unwrap(),
        "<html>report</html>"
    );
    assert!(!reports.join("1-example.com-mobile.html").exists());

    let exposition = std::fs::read_to_string(&metrics).unwrap();
    assert!(exposition.contains("journey_audit_runs_total{result=\"ok\"} 1"));
    assert!(exposition.contains("journey_audit_runs_total{result=\"error\"} 1"));
    assert!(exposition.contains("journey_audit_records_total 1"));
}

#[test]
fn json_log_format_writes_structured_lines() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let assert = journey_audit()
        .args([
            "--log-format",
            "json",
            "config",
            "path",
            "--config",
            missing.to_str().unwrap(),
        ])
        .assert()
        .success();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let first = stderr.lines().next().expect("a log line");
    assert!(first.starts_with('{'));
    assert!(first.contains("\"level\":\"INFO\""));
    assert!(first.contains("Starting journey-audit"));
}
