use std::process::Command;

use tempfile::tempdir;

fn cartera_tools() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cartera-tools"))
}

#[test]
fn missing_input_argument_prints_error_and_fails() {
    let output = cartera_tools().output().expect("binary runs");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    assert_eq!(stdout.trim(), r#"{"error":"No input file provided"}"#);
}

#[test]
fn missing_workbook_prints_error_object_and_succeeds() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("FACT ENE-26.xls");

    let output = cartera_tools().arg(&path).output().expect("binary runs");

    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(
        parsed,
        serde_json::json!({ "error": format!("File not found: {}", path.display()) })
    );
}

#[test]
fn corrupt_workbook_prints_error_object_and_succeeds() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("broken.xlsx");
    std::fs::write(&path, b"not a spreadsheet").expect("file written");

    let output = cartera_tools().arg(&path).output().expect("binary runs");

    assert_eq!(output.status.code(), Some(0));
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let message = parsed["error"].as_str().expect("error message present");
    assert!(!message.is_empty());
    assert_eq!(parsed.as_object().map(|object| object.len()), Some(1));
}
