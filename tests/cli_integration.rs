// CLI integration tests for decode/check/types flows.
use std::io::Write;
use std::process::{Command, Output, Stdio};

use serde_json::Value;

const GET_ACCOUNT: &str = r#"{"signature":{"pubkey":"ab","signature":"cd"},"creator_account_id":"a@b","created_ts":100,"query_hash":"h","query_counter":1,"query_type":"get_account","account_id":"a@b"}"#;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_queryjson");
    let mut command = Command::new(exe);
    command.env_remove("RUST_LOG");
    command
}

fn parse_json(value: &[u8]) -> Value {
    serde_json::from_slice(value).expect("valid json")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("output")
}

#[test]
fn decode_file_prints_wire_json() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("query.json");
    std::fs::write(&path, GET_ACCOUNT).expect("write");

    let output = cmd()
        .args(["decode", path.to_str().unwrap()])
        .output()
        .expect("decode");
    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    assert_eq!(value["envelope"]["signature"]["pubkey"], "ab");
    assert_eq!(value["envelope"]["creator_account_id"], "a@b");
    assert_eq!(value["envelope"]["query_counter"], 1);
    assert_eq!(value["payload"]["get_account"]["account_id"], "a@b");
    assert!(value["envelope"].get("created_ts").is_none());
}

#[test]
fn decode_stdin_compact_is_single_line() {
    let output = run_with_stdin(&["decode", "--compact"], GET_ACCOUNT);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.trim_end().lines().count(), 1);
    let value = parse_json(text.as_bytes());
    assert_eq!(value["payload"]["get_account"]["account_id"], "a@b");
}

#[test]
fn decode_failure_reports_json_error_and_exit_code() {
    let text = GET_ACCOUNT.replace("\"get_account\"", "\"get_account_assets\"");
    let output = run_with_stdin(&["decode", "-"], &text);
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "MissingField");
    assert_eq!(err["error"]["field"], "asset_id");
}

#[test]
fn decode_malformed_input_is_parse_error() {
    let output = run_with_stdin(&["decode"], "{\"signature\":");
    assert_eq!(output.status.code(), Some(3));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Parse");
    assert!(
        err["error"]["hint"]
            .as_str()
            .unwrap()
            .contains("parse category: truncated")
    );
}

#[test]
fn decode_missing_file_is_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("absent.json");
    let output = cmd()
        .args(["decode", path.to_str().unwrap()])
        .output()
        .expect("decode");
    assert_eq!(output.status.code(), Some(7));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Io");
}

#[test]
fn check_collapses_failures() {
    let ok = run_with_stdin(&["check"], GET_ACCOUNT);
    assert!(ok.status.success());
    let value = parse_json(&ok.stdout);
    assert_eq!(value["valid"], true);
    assert_eq!(value["query_type"], "get_account");

    let typo = GET_ACCOUNT.replace("\"get_account\"", "\"get_accounts\"");
    for bad in ["{", r#"{"query_type":"get_account"}"#, typo.as_str()] {
        let output = run_with_stdin(&["check"], bad);
        assert_eq!(output.status.code(), Some(1), "{bad}");
        let value = parse_json(&output.stdout);
        assert_eq!(value, serde_json::json!({"valid": false}));
    }
}

#[test]
fn types_lists_dispatch_table() {
    let output = cmd().arg("types").output().expect("types");
    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    let types = value["query_types"].as_array().expect("array");
    let names: Vec<&str> = types
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "get_account",
            "get_account_assets",
            "get_account_asset_transactions",
            "get_account_transactions",
            "get_account_signatories",
        ]
    );
    let assets = &types[1]["required_fields"];
    assert_eq!(assets, &serde_json::json!(["account_id", "asset_id"]));
}

#[test]
fn unknown_flag_is_usage_error() {
    let output = cmd().args(["decode", "--bogus"]).output().expect("run");
    assert_eq!(output.status.code(), Some(2));
    let err = parse_json(&output.stderr);
    assert_eq!(err["error"]["kind"], "Usage");
}
