use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const DATABASES: &str = include_str!("fixtures/databases.json");
const RULES: &str = include_str!("fixtures/rules.json");

fn swag(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_swag"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run swag")
}

fn workspace() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("swagger.json"), DATABASES).unwrap();
    fs::write(tmp.path().join("rules.json"), RULES).unwrap();
    tmp
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn generate_writes_client_to_stdout() {
    let tmp = workspace();
    let output = swag(tmp.path(), &["generate", "-i", "swagger.json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("package client\n"));
    assert!(out.contains("func (cl *Client) ListBranches("));
}

#[test]
fn generate_honours_flags_and_config() {
    let tmp = workspace();
    fs::write(
        tmp.path().join(".swag.yaml"),
        "input: swagger.json\noutput: gen/client.go\nclient:\n  package: dbapi\n",
    )
    .unwrap();

    let output = swag(tmp.path(), &["generate", "--base-url", "http://localhost:9000"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = fs::read_to_string(tmp.path().join("gen/client.go")).unwrap();
    assert!(out.contains("package dbapi\n"));
    assert!(out.contains("baseURL = \"http://localhost:9000\""));

    let output = swag(
        tmp.path(),
        &["generate", "-o", "other.go", "--package", "other"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let out = fs::read_to_string(tmp.path().join("other.go")).unwrap();
    assert!(out.contains("package other\n"));
}

#[test]
fn extract_rewrites_document() {
    let tmp = workspace();
    let output = swag(
        tmp.path(),
        &["extract", "-i", "swagger.json", "-r", "rules.json", "-o", "out.json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let out = fs::read_to_string(tmp.path().join("out.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
    let names: Vec<&str> = doc["definitions"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["Region", "Branch", "CreatedBranch"]);

    let again = swag(
        tmp.path(),
        &["extract", "-i", "out.json", "-r", "rules.json"],
    );
    assert!(again.status.success(), "{}", stderr(&again));
    assert_eq!(stdout(&again), out);
}

#[test]
fn extract_then_generate_uses_definitions() {
    let tmp = workspace();
    let output = swag(
        tmp.path(),
        &["extract", "-r", "rules.json", "-o", "extracted.json"],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let output = swag(tmp.path(), &["generate", "-i", "extracted.json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("type Branch struct {"));
    assert!(out.contains("type CreateBranchRes = CreatedBranch\n"));
    assert!(out.contains("[]Branch"));
    assert!(!out.contains("ListBranchesRes_DataItem"));
}

#[test]
fn extract_conflict_fails_with_diff() {
    let tmp = workspace();
    let conflicting = r#"{"extractions":[
        {"path":"/organizations/{org}/databases/{db}/branches","method":"GET","responses":200,"prop":"data","become_ref":"Branch"},
        {"path":"/organizations/{org}/databases/{db}/branches","method":"POST","responses":201,"prop":"","become_ref":"Branch"}
    ]}"#;
    fs::write(tmp.path().join("conflict.json"), conflicting).unwrap();

    let output = swag(tmp.path(), &["extract", "-r", "conflict.json"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("conflicting redefinition of Branch"), "{err}");
    assert!(err.contains("production"), "{err}");
    assert!(stdout(&output).is_empty());
}

#[test]
fn extract_requires_rules() {
    let tmp = workspace();
    let output = swag(tmp.path(), &["extract"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no extraction rules given"));
}

#[test]
fn missing_input_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let output = swag(tmp.path(), &["generate", "-i", "nope.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read nope.json"));
}

#[test]
fn generation_errors_name_their_location() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("bad.json"),
        r#"{"swagger":"2.0","paths":{"/x":{"post":{"parameters":[{"name":"a","in":"body","schema":{"type":"object"}},{"name":"b","in":"body","schema":{"type":"object"}}],"responses":{}}}}}"#,
    )
    .unwrap();
    let output = swag(tmp.path(), &["generate", "-i", "bad.json"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("POST /x"), "{err}");
    assert!(err.contains("more than one body parameter"), "{err}");
}

#[test]
fn validate_reports_summary() {
    let tmp = workspace();
    let output = swag(tmp.path(), &["validate", "-i", "swagger.json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("Valid Swagger 2.0 document: Databases API"));
    assert!(err.contains("Operations: 4"));
}

#[test]
fn validate_rejects_other_versions() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("v3.json"), r#"{"swagger":"3.0"}"#).unwrap();
    let output = swag(tmp.path(), &["validate", "-i", "v3.json"]);
    assert!(!output.status.success());
}

#[test]
fn inspect_lists_operations() {
    let tmp = workspace();
    let output = swag(tmp.path(), &["inspect", "-i", "swagger.json", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["base_url"], "https://api.example.com/v1");
    let names: Vec<&str> = summary["operations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|op| op["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["ListBranches", "CreateBranch", "GetBranch", "DeleteBranch"]
    );
    assert_eq!(
        summary["operations"][0]["responses"],
        serde_json::json!([200, 404, 500])
    );
}

#[test]
fn init_creates_config_once() {
    let tmp = tempfile::tempdir().unwrap();
    let output = swag(tmp.path(), &["init"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let content = fs::read_to_string(tmp.path().join(".swag.yaml")).unwrap();
    assert!(content.contains("input: swagger.json"));

    let output = swag(tmp.path(), &["init"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));

    let output = swag(tmp.path(), &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn completions_are_printed() {
    let tmp = tempfile::tempdir().unwrap();
    let output = swag(tmp.path(), &["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("swag"));
}
