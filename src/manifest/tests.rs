use super::*;
use crate::convert::{ArgValue, PrimitiveKind};
use crate::dispatcher::{EmptyContext, ParamSource, StaticContext};
use crate::error::MappingError;
use crate::runtime_config::DispatchConfig;
use http::Method;
use serde_json::json;
use std::io::Write;
use std::path::Path;

const YAML: &str = r#"
routes:
  - template: /products/{id}
    method: get
    handler: get_product
    params:
      - { name: id, kind: int }
      - { name: currency, kind: string, source: query, required: false }
  - template: /products
    method: POST
    handler: create_product
    roles: [ROLE_ADMIN]
    params:
      - { name: product, kind: json, source: body }
  - template: /archive/day/{year}-{month}-{day}
    method: GET
    handler: archive_day
"#;

fn handlers() -> HandlerSet {
    HandlerSet::new()
        .with("get_product", |args: &[ArgValue]| Ok(Some(serde_json::to_value(args)?)))
        .with("create_product", |args: &[ArgValue]| Ok(args[0].as_json().cloned()))
        .with("archive_day", |_: &[ArgValue]| Ok(None))
}

#[test]
fn test_format_from_extension() {
    assert_eq!(ManifestFormat::from_path(Path::new("r.yaml")), ManifestFormat::Yaml);
    assert_eq!(ManifestFormat::from_path(Path::new("r.YML")), ManifestFormat::Yaml);
    assert_eq!(ManifestFormat::from_path(Path::new("r.json")), ManifestFormat::Json);
    assert_eq!(ManifestFormat::from_path(Path::new("routes")), ManifestFormat::Json);
}

#[test]
fn test_parse_yaml() {
    let manifest = parse_manifest(YAML, ManifestFormat::Yaml).unwrap();
    assert_eq!(manifest.routes.len(), 3);

    let first = &manifest.routes[0];
    assert_eq!(first.method, Method::GET);
    assert_eq!(first.handler, "get_product");
    assert_eq!(first.params[0].source, ParamSource::Path);
    assert!(first.params[0].required);
    assert_eq!(first.params[1].source, ParamSource::Query);
    assert!(!first.params[1].required);
    assert_eq!(first.to_string(), "GET /products/{id} -> get_product");

    assert_eq!(manifest.routes[1].roles, vec!["ROLE_ADMIN".to_string()]);
    assert_eq!(manifest.routes[1].params[0].kind, PrimitiveKind::Json);
    assert!(manifest.routes[2].params.is_empty());

    let names: Vec<_> = manifest.handler_names().into_iter().collect();
    assert_eq!(names, vec!["archive_day", "create_product", "get_product"]);
}

#[test]
fn test_parse_json() {
    let text = r#"{"routes":[{"template":"/a/{b}","method":"DELETE","handler":"del",
        "params":[{"name":"b","kind":"long"}]}]}"#;
    let manifest = parse_manifest(text, ManifestFormat::Json).unwrap();
    assert_eq!(manifest.routes[0].method, Method::DELETE);
    assert_eq!(manifest.routes[0].params[0].kind, PrimitiveKind::Long);
}

#[test]
fn test_parse_rejects_bad_input() {
    assert!(parse_manifest("routes: [", ManifestFormat::Yaml).is_err());
    let bad_kind = "routes:\n  - {template: /a, method: GET, handler: h, params: [{name: x, kind: char}]}";
    assert!(parse_manifest(bad_kind, ManifestFormat::Yaml).is_err());
    let bad_method = "routes:\n  - {template: /a, method: 'NOT A VERB', handler: h}";
    assert!(parse_manifest(bad_method, ManifestFormat::Yaml).is_err());
}

#[test]
fn test_empty_manifest() {
    let manifest = parse_manifest("{}", ManifestFormat::Json).unwrap();
    assert!(manifest.routes.is_empty());
    assert!(manifest.build_registry().unwrap().is_empty());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(YAML.as_bytes()).unwrap();
    let manifest = load_manifest(file.path()).unwrap();
    assert_eq!(manifest.routes.len(), 3);
}

#[test]
fn test_load_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = load_manifest(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.yaml"));
}

#[test]
fn test_build_registry() {
    let manifest = parse_manifest(YAML, ManifestFormat::Yaml).unwrap();
    let registry = manifest.build_registry().unwrap();
    assert_eq!(registry.len(), 3);
    let m = registry.find(&Method::GET, "/archive/day/2024-06-01").unwrap();
    assert_eq!(m.get("day"), Some("01"));
}

#[test]
fn test_build_registry_reports_invalid_template() {
    let text = "routes:\n  - {template: '/a/{b', method: GET, handler: h}";
    let manifest = parse_manifest(text, ManifestFormat::Yaml).unwrap();
    let err = manifest.build_registry().unwrap_err();
    assert!(matches!(err, MappingError::InvalidTemplate { .. }));
}

#[test]
fn test_build_dispatcher_and_dispatch() {
    let manifest = parse_manifest(YAML, ManifestFormat::Yaml).unwrap();
    let d = manifest
        .build_dispatcher(&handlers(), DispatchConfig::default())
        .unwrap();

    let done = d
        .dispatch(&Method::GET, "/products/9", &StaticContext::new().with_query("currency", "GBP"))
        .unwrap();
    assert_eq!(done.result, Some(json!([9, "GBP"])));

    let done = d.dispatch(&Method::GET, "/products/9", &EmptyContext).unwrap();
    assert_eq!(done.result, Some(json!([9, null])));

    let admin = StaticContext::new()
        .with_roles(["ROLE_ADMIN"])
        .with_body(r#"{"sku":"A1"}"#);
    let done = d.dispatch(&Method::POST, "/products", &admin).unwrap();
    assert_eq!(done.result, Some(json!({"sku": "A1"})));

    let anonymous = StaticContext::new().with_roles(Vec::<String>::new());
    let err = d.dispatch(&Method::POST, "/products", &anonymous).unwrap_err();
    assert!(matches!(err, MappingError::Forbidden { .. }));
}

#[test]
fn test_build_dispatcher_unknown_handler() {
    let manifest = parse_manifest(YAML, ManifestFormat::Yaml).unwrap();
    let partial = HandlerSet::new().with("get_product", |_: &[ArgValue]| Ok(None));
    let err = manifest
        .build_dispatcher(&partial, DispatchConfig::default())
        .unwrap_err();
    assert!(err.is_registration_error());
    assert!(matches!(err, MappingError::UnknownHandler { ref handler } if handler == "create_product"));
}

#[test]
fn test_handler_set_debug_lists_sorted_names() {
    let set = handlers();
    assert_eq!(set.len(), 3);
    assert!(!set.is_empty());
    let debug = format!("{set:?}");
    assert!(debug.find("archive_day").unwrap() < debug.find("get_product").unwrap());
}
