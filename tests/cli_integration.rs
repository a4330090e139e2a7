//! CLI integration tests
//!
//! These run the built binary and check exit codes, stdout shape and the
//! error messages printed for bad input.

mod support;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use support::initscope_bin;
use tempfile::TempDir;

const JS_SNIPPET: &str = r#"import * as Sentry from "@sentry/node";

Sentry.init({
  dsn: "https://examplePublicKey@o0.ingest.sentry.io/0",
  environment: "production",
  tracesSampleRate: 1.5,
});
"#;

fn initscope() -> Command {
    let mut command = Command::new(initscope_bin());
    command
        .env_remove("RUST_LOG")
        .env_remove("INITSCOPE_LOG_LEVEL")
        .env_remove("INITSCOPE_LOG_JSON")
        .env_remove("INITSCOPE_MAX_INPUT_SIZE")
        .env_remove("INITSCOPE_MAX_NESTING_DEPTH");
    command
}

fn write_snippet(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write snippet");
    path
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = initscope()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn initscope");
    // The binary may exit before reading stdin, so a broken pipe is fine
    let _ = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes());
    child.wait_with_output().expect("Failed to wait for initscope")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}):\n{}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn test_cli_help() {
    let output = initscope().arg("--help").output().expect("Failed to execute initscope");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["analyze", "extract", "options", "syntaxes"] {
        assert!(stdout.contains(command), "help is missing {}", command);
    }
}

#[test]
fn test_cli_version() {
    let output = initscope().arg("--version").output().expect("Failed to execute initscope");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_analyze_json_guesses_syntax_from_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_snippet(&dir, "sentry.js", JS_SNIPPET);

    let output = initscope()
        .args(["analyze", "--format", "json"])
        .arg(&path)
        .output()
        .expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["syntax"], "javascript");
    assert!(json["score"].as_u64().is_some());

    let rate = json["options"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["option"]["key"] == "tracesSampleRate")
        .expect("tracesSampleRate analyzed");
    assert!(rate["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .any(|d| d["code"] == "sample-rate-range" && d["severity"] == "error"));
}

#[test]
fn test_analyze_human_output() {
    let dir = TempDir::new().unwrap();
    let path = write_snippet(&dir, "sentry.js", JS_SNIPPET);

    let output = initscope().arg("analyze").arg(&path).output().expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sentry Configuration (JavaScript)"));
    assert!(stdout.contains("Score:"));
    assert!(stdout.contains("Options:"));
    assert!(stdout.contains("[sample-rate-range]"));
    assert!(stdout.contains("Recommendations:"));
}

#[test]
fn test_analyze_fail_under_exits_with_two() {
    let dir = TempDir::new().unwrap();
    let path = write_snippet(&dir, "sentry.js", JS_SNIPPET);

    let output = initscope()
        .args(["analyze", "--fail-under", "100", "--format", "json"])
        .arg(&path)
        .output()
        .expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(2));
    // The report is still printed before the threshold is checked
    assert_eq!(stdout_json(&output)["valid"], true);
}

#[test]
fn test_analyze_unparseable_snippet_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let path = write_snippet(&dir, "app.py", "print('no sentry here')\n");

    let output = initscope()
        .args(["analyze", "--format", "json"])
        .arg(&path)
        .output()
        .expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert!(json["score"].is_null());
    assert!(!json["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_analyze_stdin_requires_syntax() {
    let output = run_with_stdin(&["analyze"], JS_SNIPPET);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--syntax"));
}

#[test]
fn test_analyze_stdin_with_syntax() {
    let snippet = "sentry_sdk.init(\n    dsn=\"https://k@o1.ingest.sentry.io/2\",\n    send_default_pii=True,\n)\n";
    let output = run_with_stdin(&["analyze", "--syntax", "py", "--format", "json"], snippet);

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let json = stdout_json(&output);
    assert_eq!(json["syntax"], "python");
    let text = json.to_string();
    assert!(text.contains("pii-enabled"));
    assert!(!text.contains("unknown-option"));
}

#[test]
fn test_analyze_missing_file() {
    let output = initscope()
        .args(["analyze", "/nonexistent/path/sentry.js"])
        .output()
        .expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path does not exist"));
}

#[test]
fn test_analyze_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_snippet(&dir, "sentry.txt", JS_SNIPPET);

    let output = initscope().arg("analyze").arg(&path).output().expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unrecognized file extension"));
}

#[test]
fn test_invalid_syntax_name_is_rejected() {
    let output = initscope()
        .args(["analyze", "--syntax", "cobol", "-"])
        .output()
        .expect("Failed to execute initscope");

    assert!(!output.status.success());
}

#[test]
fn test_extract_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_snippet(
        &dir,
        "sentry.rb",
        "Sentry.init do |config|\n  config.dsn = ENV['SENTRY_DSN']\n  config.traces_sample_rate = 0.5\nend\n",
    );

    let output = initscope()
        .args(["extract", "--format", "yaml"])
        .arg(&path)
        .output()
        .expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(0));
    let yaml: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).expect("stdout is YAML");
    assert_eq!(yaml["syntax"], serde_yaml::Value::from("ruby"));
    assert_eq!(yaml["valid"], serde_yaml::Value::from(true));
    let options = &yaml["options"];
    assert_eq!(
        options["traces_sample_rate"]["value"]["value"],
        serde_yaml::Value::from(0.5)
    );
    assert_eq!(
        options["dsn"]["value_type"],
        serde_yaml::Value::from("expression")
    );
}

#[test]
fn test_extract_invalid_exits_with_one() {
    let output = run_with_stdin(&["extract", "--syntax", "go", "--format", "json"], "package main\n");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["valid"], false);
}

#[test]
fn test_options_by_category_with_native_keys() {
    let output = initscope()
        .args(["options", "--category", "sampling", "--syntax", "python", "--format", "json"])
        .output()
        .expect("Failed to execute initscope");

    assert!(output.status.success());
    let json = stdout_json(&output);
    let entries = json.as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["category"] == "sampling"));
    let rate = entries
        .iter()
        .find(|e| e["key"] == "tracesSampleRate")
        .expect("tracesSampleRate listed");
    assert_eq!(rate["native_key"], "traces_sample_rate");
}

#[test]
fn test_options_required_only() {
    let output = initscope()
        .args(["options", "--required", "--format", "json"])
        .output()
        .expect("Failed to execute initscope");

    assert!(output.status.success());
    let json = stdout_json(&output);
    let keys: Vec<&str> = json.as_array().unwrap().iter().filter_map(|e| e["key"].as_str()).collect();
    assert_eq!(keys, vec!["dsn"]);
}

#[test]
fn test_options_search_human() {
    let output = initscope()
        .args(["options", "--search", "REPLAY"])
        .output()
        .expect("Failed to execute initscope");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Sentry Options ("));
    assert!(stdout.contains("replaysSessionSampleRate"));
}

#[test]
fn test_syntaxes_lists_all_twelve() {
    let output = initscope()
        .args(["syntaxes", "--format", "json"])
        .output()
        .expect("Failed to execute initscope");

    assert!(output.status.success());
    let json = stdout_json(&output);
    let ids: Vec<&str> = json.as_array().unwrap().iter().filter_map(|s| s["id"].as_str()).collect();
    assert_eq!(ids.len(), 12);
    for id in ["javascript", "python", "elixir", "dotnet", "cocoa"] {
        assert!(ids.contains(&id), "missing {}", id);
    }
}

#[test]
fn test_invalid_config_env_fails_fast() {
    let output = initscope()
        .env("INITSCOPE_MAX_NESTING_DEPTH", "0")
        .arg("syntaxes")
        .output()
        .expect("Failed to execute initscope");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_malformed_config_env_fails_fast() {
    for (var, value) in [
        ("INITSCOPE_MAX_NESTING_DEPTH", "abc"),
        ("INITSCOPE_MAX_INPUT_SIZE", "1MB"),
        ("INITSCOPE_LOG_JSON", "yes please"),
    ] {
        let output = initscope()
            .env(var, value)
            .args(["config", "--format", "json"])
            .output()
            .expect("Failed to execute initscope");

        assert_eq!(output.status.code(), Some(1), "{}={}", var, value);
        assert!(output.stdout.is_empty(), "{}={}", var, value);
        assert!(String::from_utf8_lossy(&output.stderr).contains(var), "{}={}", var, value);
    }
}

#[test]
fn test_config_reports_environment_overrides() {
    let output = initscope()
        .env("INITSCOPE_MAX_NESTING_DEPTH", "8")
        .args(["config", "--format", "json"])
        .output()
        .expect("Failed to execute initscope");

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["max_nesting_depth"], "8");
    assert_eq!(json["max_input_size"], "1048576");
}
