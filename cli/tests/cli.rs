use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn prints_parsed_value_as_pretty_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, r#"{"name":"Ada","age":37}"#);

    let expected = "{\n  \"name\": \"Ada\",\n  \"age\": 37\n}\n";

    cargo_bin_cmd!("bytejson")
        .arg(&input)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn reads_stdin_and_prints_compact_json() {
    cargo_bin_cmd!("bytejson")
        .args(["--indent", "0"])
        .write_stdin("[1, 2.5, \"a\\u0041\", null]")
        .assert()
        .success()
        .stdout("[1,2.5,\"aA\",null]\n");
}

#[test]
fn check_reports_valid_input() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    write_file(&input, "{\"key\": [true, false]}\n");

    cargo_bin_cmd!("bytejson")
        .arg(&input)
        .arg("--check")
        .assert()
        .success()
        .stdout(contains("✔ valid JSON"));
}

#[test]
fn invalid_input_fails_with_error_message() {
    cargo_bin_cmd!("bytejson")
        .arg("--check")
        .write_stdin("[1,2,]")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(
            contains("ERROR  unexpected token `]`, expected a value")
                .and(contains("line 1, column 6")),
        );
}

#[test]
fn scan_errors_are_reported() {
    cargo_bin_cmd!("bytejson")
        .write_stdin("{\"a\": 0123}")
        .assert()
        .failure()
        .stderr(contains("ERROR  leading zeros are not allowed"));
}

#[test]
fn tokens_mode_lists_every_token() {
    cargo_bin_cmd!("bytejson")
        .arg("--tokens")
        .write_stdin("{\"k\":\n [1, true]}")
        .assert()
        .success()
        .stdout(
            "LeftBrace @1:1\n\
             String k @1:2\n\
             Colon @1:5\n\
             LeftBracket @2:2\n\
             Number 1 @2:3\n\
             Comma @2:4\n\
             True true @2:6\n\
             RightBracket @2:10\n\
             RightBrace @2:11\n\
             EndOfInput @2:12\n",
        );
}

#[test]
fn depth_limit_flags() {
    let deep = format!("{}{}", "[".repeat(5), "]".repeat(5));

    cargo_bin_cmd!("bytejson")
        .args(["--check", "--max-depth", "4"])
        .write_stdin(deep.clone())
        .assert()
        .failure()
        .stderr(contains("nesting too deep, maximum depth is 4"));

    cargo_bin_cmd!("bytejson")
        .args(["--check", "--max-depth", "5"])
        .write_stdin(deep)
        .assert()
        .success();

    let very_deep = format!("{}{}", "[".repeat(300), "]".repeat(300));
    cargo_bin_cmd!("bytejson")
        .arg("--check")
        .write_stdin(very_deep.clone())
        .assert()
        .failure();

    cargo_bin_cmd!("bytejson")
        .args(["--check", "--no-depth-limit"])
        .write_stdin(very_deep)
        .assert()
        .success();
}

#[test]
fn utf8_flag_accepts_non_ascii_strings() {
    let input = "[\"caf\u{e9}\"]";

    cargo_bin_cmd!("bytejson")
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(contains("ERROR"));

    cargo_bin_cmd!("bytejson")
        .args(["--utf8", "--indent", "0"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("[\"caf\u{e9}\"]\n");
}

#[test]
fn writes_to_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("input.json");
    let output = dir.path().join("output.json");
    write_file(&input, r#"{"name":"Ada"}"#);

    cargo_bin_cmd!("bytejson")
        .arg(&input)
        .args(["-o", output.to_str().expect("output path")])
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(contains("Parsed").and(contains("output.json")));

    let contents = fs::read_to_string(&output).expect("read output");
    assert_eq!(contents, "{\"name\":\"Ada\"}\n");
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("missing.json");

    cargo_bin_cmd!("bytejson")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("ERROR  failed to read"));
}
