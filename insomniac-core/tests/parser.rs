use insomniac_core::{parse_export_str, ExportFormat, ImportError};

const EXPORT_JSON: &str = r#"{
  "_type": "export",
  "__export_format": 4,
  "__export_source": "insomnia.desktop.app:v2023.5.8",
  "resources": [
    { "_id": "wrk_1", "_type": "workspace", "parentId": null, "name": "Shop", "description": "" },
    { "_id": "env_base", "_type": "environment", "parentId": "wrk_1", "name": "Base Environment", "data": {} },
    { "_id": "env_dev", "_type": "environment", "parentId": "env_base", "name": "dev", "data": { "host": "localhost" } },
    { "_id": "fld_1", "_type": "request_group", "parentId": "wrk_1", "name": "checkout", "metaSortKey": -10 },
    {
      "_id": "req_a1", "_type": "request", "parentId": "fld_1", "name": "login",
      "method": "POST", "url": "http://localhost/login",
      "body": { "mimeType": "application/json", "text": "{\"user\":\"a\"}" },
      "headers": [{ "name": "Content-Type", "value": "application/json" }],
      "metaSortKey": -2
    },
    {
      "_id": "req_b2", "_type": "request", "parentId": "fld_1", "name": "cart",
      "method": "GET", "url": "http://localhost/cart",
      "headers": [{ "name": "Authorization", "value": "{% response 'body', 'req_a1', '$.token' %}", "disabled": false }],
      "parameters": [{ "name": "page", "value": "1" }, { "name": "debug", "value": "1", "disabled": true }]
    },
    { "_id": "jar_1", "_type": "cookie_jar", "parentId": "wrk_1", "name": "Default Jar", "cookies": [] }
  ]
}"#;

#[test]
fn parses_json_export_and_keeps_ids() {
    let parsed = parse_export_str(EXPORT_JSON, ExportFormat::Auto).unwrap();

    assert_eq!(parsed.format, ExportFormat::Json);
    assert_eq!(parsed.workspace.id, "wrk_1");
    assert_eq!(parsed.workspace.description, None);
    assert_eq!(parsed.environments.len(), 2);
    assert_eq!(parsed.environments[1].parent_id, "env_base");
    assert_eq!(parsed.groups.len(), 1);
    assert_eq!(parsed.groups[0].name, "checkout");

    let reqs = &parsed.requests;
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].id, "req_a1");
    assert_eq!(reqs[0].body.text.as_deref(), Some("{\"user\":\"a\"}"));
    assert_eq!(reqs[1].headers[0].name, "Authorization");
    assert_eq!(reqs[1].enabled_parameters().count(), 1);
    assert!(reqs[1].dependency_ids.is_empty());
}

#[test]
fn parses_yaml_export() {
    let yaml = r#"
_type: export
__export_format: 4
resources:
  - _id: wrk_9
    _type: workspace
    name: Yaml Workspace
  - _id: fld_9
    _type: request_group
    parentId: wrk_9
    name: smoke
  - _id: req_f00d
    _type: request
    parentId: fld_9
    name: health
    url: https://example.com/health
"#;

    let parsed = parse_export_str(yaml, ExportFormat::Auto).unwrap();
    assert_eq!(parsed.format, ExportFormat::Yaml);
    assert_eq!(parsed.requests[0].method, "GET");
    assert_eq!(parsed.requests[0].parent_id, "fld_9");
}

#[test]
fn rejects_documents_that_are_not_exports() {
    let err = parse_export_str(r#"{"_type": "workspace", "resources": []}"#, ExportFormat::Json)
        .unwrap_err();
    assert!(matches!(err, ImportError::NotAnExport(Some(ref t)) if t == "workspace"));
}

#[test]
fn rejects_unsupported_export_versions() {
    let err = parse_export_str(
        r#"{"_type": "export", "__export_format": 2, "resources": []}"#,
        ExportFormat::Json,
    )
    .unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(2)));
}

#[test]
fn requires_exactly_one_workspace() {
    let none = parse_export_str(r#"{"_type": "export", "resources": []}"#, ExportFormat::Json)
        .unwrap_err();
    assert!(matches!(none, ImportError::WorkspaceCount(0)));

    let two = r#"{"_type": "export", "resources": [
        {"_id": "wrk_1", "_type": "workspace", "name": "a"},
        {"_id": "wrk_2", "_type": "workspace", "name": "b"}
    ]}"#;
    assert!(matches!(
        parse_export_str(two, ExportFormat::Json).unwrap_err(),
        ImportError::WorkspaceCount(2)
    ));
}

#[test]
fn reports_json_error_for_broken_json_looking_input() {
    let err = parse_export_str("{ not json", ExportFormat::Auto).unwrap_err();
    assert!(matches!(err, ImportError::Json(_)));
}
