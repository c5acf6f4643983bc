use swag_core::error::{ExtractError, ResolveError};
use swag_core::parse;
use swag_core::parse::operation::HttpMethod;
use swag_core::parse::spec::SwaggerSpec;
use swag_core::transform::{ExtractConfig, ExtractOutcome, ExtractRule, apply_rule, extract};

const DATABASES: &str = include_str!("fixtures/databases.json");
const RULES: &str = include_str!("fixtures/rules.json");

const BRANCHES: &str = "/organizations/{org}/databases/{db}/branches";

fn rule(path: &str, method: HttpMethod, code: u16, prop: &str, name: &str) -> ExtractRule {
    ExtractRule {
        path: path.to_string(),
        method,
        responses: code,
        prop: prop.to_string(),
        become_ref: name.to_string(),
    }
}

fn response_root<'a>(spec: &'a SwaggerSpec, path: &str, method: HttpMethod, code: u16) -> &'a swag_core::parse::schema::Schema {
    spec.paths[path]
        .operation(method)
        .unwrap()
        .response(code)
        .unwrap()
        .schema
        .as_ref()
        .unwrap()
}

#[test]
fn extract_nested_array_element() {
    let mut spec = parse::from_json(
        r#"{"swagger":"2.0","paths":{"/a/{id}":{"get":{"responses":{"200":{"description":"ok","schema":
            {"type":"object","properties":{"data":{"type":"object","properties":{"items":
                {"type":"array","items":{"type":"object","properties":{"id":{"type":"string"}}}}}}}}}}}}}}"#,
    )
    .unwrap();

    let outcome = apply_rule(
        &mut spec,
        &rule("/a/{id}", HttpMethod::Get, 200, "data.items", "Item"),
    )
    .unwrap();
    assert_eq!(outcome, ExtractOutcome::Inserted);

    let item = &spec.definitions["Item"];
    assert!(item.is_object());
    assert!(item.properties.contains_key("id"));

    let root = response_root(&spec, "/a/{id}", HttpMethod::Get, 200);
    let items = &root.properties["data"].properties["items"];
    assert!(items.is_array());
    assert_eq!(
        items.single_items().and_then(|s| s.ref_path.as_deref()),
        Some("#/definitions/Item")
    );
}

#[test]
fn extract_through_ref_edits_shared_definition() {
    let mut spec = parse::from_json(
        r##"{"swagger":"2.0","paths":{
            "/a":{"get":{"responses":{"200":{"description":"ok","schema":{"$ref":"#/definitions/Wrapper"}}}}},
            "/b":{"get":{"responses":{"200":{"description":"ok","schema":{"$ref":"#/definitions/Wrapper"}}}}}
        },"definitions":{"Wrapper":{"type":"object","properties":{"inner":{"type":"object","properties":{"id":{"type":"string"}}}}}}}"##,
    )
    .unwrap();

    let outcome = apply_rule(&mut spec, &rule("/a", HttpMethod::Get, 200, "inner", "Inner")).unwrap();
    assert_eq!(outcome, ExtractOutcome::Inserted);
    assert!(spec.definitions["Inner"].properties.contains_key("id"));
    assert_eq!(
        spec.definitions["Wrapper"].properties["inner"].ref_path.as_deref(),
        Some("#/definitions/Inner")
    );

    // The other operation shares the definition and sees the reference too.
    assert_eq!(
        apply_rule(&mut spec, &rule("/b", HttpMethod::Get, 200, "inner", "Inner")).unwrap(),
        ExtractOutcome::AlreadyReferenced
    );
    assert_eq!(
        response_root(&spec, "/a", HttpMethod::Get, 200).ref_path.as_deref(),
        Some("#/definitions/Wrapper")
    );
}

#[test]
fn extract_fixture_rules() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let config = ExtractConfig::from_json(RULES).unwrap();

    let outcomes: Vec<ExtractOutcome> = config
        .extractions
        .iter()
        .map(|r| apply_rule(&mut spec, r).unwrap())
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ExtractOutcome::Reused,
            ExtractOutcome::Inserted,
            ExtractOutcome::Reused,
            ExtractOutcome::Inserted,
        ]
    );

    let names: Vec<&str> = spec.definitions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Region", "Branch", "CreatedBranch"]);

    let branch = &spec.definitions["Branch"];
    assert_eq!(branch.required, vec!["id", "name"]);
    assert_eq!(
        branch.properties["region"].ref_path.as_deref(),
        Some("#/definitions/Region")
    );

    let created = &spec.definitions["CreatedBranch"];
    assert_eq!(
        created.properties["region"].ref_path.as_deref(),
        Some("#/definitions/Region")
    );
}

#[test]
fn extract_root_keeps_description() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Post, 201, "", "CreatedBranch")).unwrap();

    let root = response_root(&spec, BRANCHES, HttpMethod::Post, 201);
    assert_eq!(root.ref_name(), Some("CreatedBranch"));
    assert_eq!(root.description.as_deref(), Some("A freshly created branch"));
    assert!(root.properties.is_empty());
    assert!(root.extra.is_empty());

    let created = &spec.definitions["CreatedBranch"];
    assert!(created.extra.contains_key("x-go-name"));
}

#[test]
fn extract_twice_is_identity() {
    let config = ExtractConfig::from_json(RULES).unwrap();

    let mut once = parse::from_json(DATABASES).unwrap();
    extract(&mut once, &config.extractions).unwrap();
    let once_json = parse::to_json(&once).unwrap();

    let mut twice = parse::from_json(&once_json).unwrap();
    extract(&mut twice, &config.extractions).unwrap();
    let twice_json = parse::to_json(&twice).unwrap();

    assert_eq!(once_json, twice_json);
}

#[test]
fn extract_second_pass_reports_existing_refs() {
    let config = ExtractConfig::from_json(RULES).unwrap();
    let mut spec = parse::from_json(DATABASES).unwrap();
    extract(&mut spec, &config.extractions).unwrap();

    for r in &config.extractions {
        assert_eq!(
            apply_rule(&mut spec, r).unwrap(),
            ExtractOutcome::AlreadyReferenced,
            "rule {r:?}"
        );
    }
}

#[test]
fn extract_keeps_document_shape() {
    let config = ExtractConfig::from_json(RULES).unwrap();
    let mut spec = parse::from_json(DATABASES).unwrap();
    extract(&mut spec, &config.extractions).unwrap();
    let json: serde_json::Value = serde_json::from_str(&parse::to_json(&spec).unwrap()).unwrap();

    assert_eq!(json["schemes"], serde_json::json!(["https"]));
    assert_eq!(json["info"]["x-logo"], "db.svg");
    assert_eq!(json["basePath"], "/v1");
    assert_eq!(
        json["paths"][BRANCHES]["get"]["responses"]["200"]["schema"]["properties"]["data"]["items"]
            ["$ref"],
        "#/definitions/Branch"
    );
}

#[test]
fn extract_conflicting_redefinition() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Get, 200, "data", "Branch")).unwrap();

    let err = apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Post, 201, "", "Branch")).unwrap_err();
    match err {
        ExtractError::ConflictingRedefinition { name, diff } => {
            assert_eq!(name, "Branch");
            assert!(diff.contains("--- existing"));
            assert!(diff.contains("+++ extracted"));
            assert!(diff.contains("production"));
        }
        other => panic!("expected ConflictingRedefinition, got {other:?}"),
    }

    // the first definition is untouched
    assert!(spec.definitions["Branch"].properties.contains_key("production"));
}

#[test]
fn extract_unknown_path() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let err = apply_rule(&mut spec, &rule("/nope", HttpMethod::Get, 200, "", "X")).unwrap_err();
    assert!(matches!(err, ExtractError::UnknownPath { path } if path == "/nope"));
}

#[test]
fn extract_no_operation_for_method() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let err = apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Patch, 200, "", "X")).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::NoOperationForMethod { method: HttpMethod::Patch, .. }
    ));
}

#[test]
fn extract_no_such_response_code() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let err = apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Get, 418, "", "X")).unwrap_err();
    assert!(matches!(err, ExtractError::NoSuchResponseCode { code: 418, .. }));
}

#[test]
fn extract_response_has_no_schema() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let err = apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Get, 404, "", "X")).unwrap_err();
    assert!(matches!(err, ExtractError::ResponseHasNoSchema { code: 404, .. }));
}

#[test]
fn extract_no_such_property() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let err = apply_rule(
        &mut spec,
        &rule(BRANCHES, HttpMethod::Get, 200, "data.owner", "Owner"),
    )
    .unwrap_err();
    match err {
        ExtractError::Property { prop, source, .. } => {
            assert_eq!(prop, "data.owner");
            assert!(matches!(source, ResolveError::NoSuchProperty(p) if p == "owner"));
        }
        other => panic!("expected Property error, got {other:?}"),
    }
    assert!(!spec.definitions.contains_key("Owner"));
}

#[test]
fn extract_error_message_names_location() {
    let mut spec = parse::from_json(DATABASES).unwrap();
    let err = apply_rule(&mut spec, &rule(BRANCHES, HttpMethod::Get, 404, "", "X")).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("GET {BRANCHES}: response 404 has no schema")
    );
}
