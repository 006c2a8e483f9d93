//! End-to-end tests for the cookparse binary

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const RECIPE: &str = "-- family favourite
>> servings: 2
Crack @eggs{3} into a #bowl and whisk.
Cook in a #non-stick pan{} for ~{3%minutes}.
";

fn recipe_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn cookparse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cookparse"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Parse Command
// ============================================================================

#[test]
fn test_parse_is_default_command() {
    let file = recipe_file(RECIPE);
    let output = cookparse(&[file.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Ingredients: 1"), "{out}");
    assert!(out.contains("eggs (3)"), "{out}");
    assert!(out.contains("Cookware: bowl, non-stick pan"), "{out}");
    assert!(out.contains("Steps: 2"), "{out}");
}

#[test]
fn test_parse_subcommand_verbose() {
    let file = recipe_file(RECIPE);
    let output = cookparse(&["parse", "-v", file.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Cookware non-stick pan"), "{out}");
    assert!(out.contains("Timer (anonymous) (3%minutes)"), "{out}");
}

#[test]
fn test_parse_json() {
    let file = recipe_file(RECIPE);
    let output = cookparse(&["-j", file.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["metadata"]["servings"], "2");
    assert_eq!(json["ingredients"][0]["name"], "eggs");
    assert_eq!(json["ingredients"][0]["quantity"], "3");
    assert!(json["ingredients"][0]["unit"].is_null());
    assert_eq!(json["cookware"], serde_json::json!(["bowl", "non-stick pan"]));
    assert_eq!(json["steps"][0][0]["type"], "text");
    assert_eq!(json["steps"][0][0]["value"], "Crack");
    assert_eq!(json["steps"][1][3]["type"], "timer");
    assert_eq!(json["steps"][1][3]["duration"], "3%minutes");
    assert_eq!(json["timers"], serde_json::json!([["", "3%minutes"]]));
    assert_eq!(
        json["comments"],
        serde_json::json!([{"type": "comment", "name": "family favourite"}])
    );
    assert_eq!(json["images"], serde_json::json!([]));
}

#[test]
fn test_parse_error_exits_nonzero() {
    let file = recipe_file("Wait ~??? and serve.");
    let output = cookparse(&[file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let err = stderr(&output);
    assert!(err.starts_with("error: failed to parse"), "{err}");
    assert!(err.contains("invalid timer syntax '~???' on line 1"), "{err}");
}

#[test]
fn test_missing_file() {
    let output = cookparse(&["/nonexistent/recipe.cook"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("failed to read"));
}

#[test]
fn test_no_file() {
    let output = cookparse(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no input file specified"));
}

// ============================================================================
// Validate Command
// ============================================================================

#[test]
fn test_validate_ok() {
    let file = recipe_file(RECIPE);
    let output = cookparse(&["validate", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Valid: no errors found"));
}

#[test]
fn test_validate_json_reports_error() {
    let file = recipe_file("Mix.\nRest ~{5 minutes");
    let output = cookparse(&["validate", "--json", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_str(stdout(&output).trim()).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["kind"], "InvalidTimerSyntax");
    assert_eq!(json["errors"][0]["text"], "~{5");
    assert_eq!(json["errors"][0]["line"], 2);
}

// ============================================================================
// Stats Command
// ============================================================================

#[test]
fn test_stats() {
    let file = recipe_file(RECIPE);
    let output = cookparse(&["stats", file.path().to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Recipe Statistics"), "{out}");
    assert!(out.contains("Steps:          2"), "{out}");
    assert!(out.contains("Cookware:       2"), "{out}");
    assert!(out.contains("Comments:       1"), "{out}");
}
