//! Tests for export parsing and settings resolution.
mod common;
use common::*;
use flowcast::config::{CONFIG_FILENAME, DEFAULT_OUTPUT_DIR};
use flowcast::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn parse(value: serde_json::Value) -> std::result::Result<FlowDocument, ParseError> {
    parse_export_str(&value.to_string(), metadata(Path::new("out")), &ParseOptions::default())
}

#[test]
fn test_parse_nested_export() {
    let document = parse_export_str(
        &simple_export_json(),
        metadata(Path::new("out")),
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(document.flow_id, "simple-passthrough");
    assert_eq!(document.name, "Simple Passthrough");
    assert_eq!(document.version, "1.5.1");
    assert_eq!(document.description.as_deref(), Some("Echoes chat input"));
    assert_eq!(document.tags, ["demo"]);
    assert_eq!(document.nodes.len(), 2);
    assert_eq!(document.nodes[0].node_type, "genericNode");
    assert_eq!(document.nodes[0].config.get("input_value"), Some(&json!("hi")));
    assert_eq!(document.edges[0].source, "ChatInput-1");
    assert_eq!(document.edges[0].config.get("sourceHandle"), Some(&json!("message")));
    assert_eq!(document.metadata.output_dir, PathBuf::from("out"));
}

#[test]
fn test_node_type_falls_back_to_data_type() {
    let document = parse(json!({
        "id": "f", "name": "F", "version": "1.0.0",
        "nodes": [{"id": "n", "data": {"type": "Prompt"}}],
        "edges": []
    }))
    .unwrap();
    assert_eq!(document.nodes[0].node_type, "Prompt");
}

#[test]
fn test_explicit_version_wins_over_last_tested() {
    let document = parse(json!({
        "id": "f", "name": "F", "version": "1.0.0", "last_tested_version": "9.9.9",
        "nodes": [], "edges": []
    }))
    .unwrap();
    assert_eq!(document.version, "1.0.0");
}

#[test]
fn test_missing_id_is_reported_first() {
    let err = parse(json!({"nodes": [], "edges": []})).unwrap_err();
    match err {
        ParseError::MissingField { field, .. } => assert_eq!(field, "id"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_missing_version_is_reported() {
    let err = parse(json!({"id": "f", "name": "F", "nodes": [], "edges": []})).unwrap_err();
    assert!(matches!(err, ParseError::MissingField { ref field, .. } if field == "version"));
}

#[test]
fn test_missing_edge_source_names_edge() {
    let err = parse(json!({
        "id": "f", "name": "F", "version": "1.0.0",
        "nodes": [{"id": "a", "type": "T"}],
        "edges": [{"id": "e", "target": "a"}]
    }))
    .unwrap_err();
    match err {
        ParseError::MissingField { field, context } => {
            assert_eq!(field, "source");
            assert_eq!(context, "edge #0");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_nodes_must_be_a_list() {
    let err = parse(json!({
        "id": "f", "name": "F", "version": "1.0.0",
        "nodes": {"a": {}}, "edges": []
    }))
    .unwrap_err();
    assert!(matches!(err, ParseError::InvalidShape { ref field, .. } if field == "nodes"));
}

#[test]
fn test_node_data_must_be_a_mapping() {
    let err = parse(json!({
        "id": "f", "name": "F", "version": "1.0.0",
        "nodes": [{"id": "a", "type": "T", "data": [1, 2]}], "edges": []
    }))
    .unwrap_err();
    assert!(matches!(err, ParseError::InvalidShape { ref field, .. } if field == "data"));
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let err = parse_export_str("{not json", metadata(Path::new("out")), &ParseOptions::default())
        .unwrap_err();
    assert!(matches!(err, ParseError::Json(_)));
}

#[test]
fn test_unsupported_version_is_rejected() {
    let export = json!({
        "id": "f", "name": "F", "version": "0.1.0", "nodes": [], "edges": []
    })
    .to_string();

    let err = parse_export_str(&export, metadata(Path::new("out")), &ParseOptions::default())
        .unwrap_err();
    match err {
        ParseError::UnsupportedVersion { found, supported } => {
            assert_eq!(found, "0.1.0");
            assert_eq!(supported, "1.0.0, 1.5.1");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let document =
        parse_export_str(&export, metadata(Path::new("out")), &ParseOptions::any_version())
            .unwrap();
    assert_eq!(document.version, "0.1.0");
}

#[test]
fn test_parse_export_file_reads_from_disk() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("flow.json");
    fs::write(&source, branching_export_json()).unwrap();

    let settings = Settings::default().with_output_dir(dir.path().join("dist"));
    let document = parse_export_file(&source, &settings, &ParseOptions::default()).unwrap();

    assert_eq!(document.flow_id, "price-deal-finder");
    assert_eq!(document.metadata.source_path, source);
    assert_eq!(document.metadata.output_dir, dir.path().join("dist"));
    assert!(document.nodes[3].config.is_empty());
}

#[test]
fn test_parse_export_file_missing_is_io_error() {
    let dir = tempdir().unwrap();
    let err = parse_export_file(
        &dir.path().join("absent.json"),
        &Settings::default(),
        &ParseOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}

// --- Settings ---

#[test]
fn test_settings_defaults() {
    let settings = Settings::from_sources(SettingsSources::default()).unwrap();
    assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    assert_eq!(settings.config_file, None);
    assert_eq!(settings.endpoint_policy, EndpointPolicy::Tolerate);
}

#[test]
fn test_settings_read_discovered_config_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        "paths:\n  output_dir: generated\nanalysis:\n  strict_endpoints: true\n",
    )
    .unwrap();

    let settings = Settings::from_sources(SettingsSources {
        search_paths: vec![dir.path().to_path_buf()],
        ..Default::default()
    })
    .unwrap();

    assert_eq!(settings.output_dir, PathBuf::from("generated"));
    assert_eq!(settings.endpoint_policy, EndpointPolicy::Strict);
    assert_eq!(settings.config_file, Some(dir.path().join(CONFIG_FILENAME)));
}

#[test]
fn test_explicit_values_override_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("custom.yaml");
    fs::write(&config, "paths:\n  output_dir: generated\nanalysis:\n  strict_endpoints: true\n").unwrap();

    let settings = Settings::from_sources(SettingsSources {
        output_dir: Some(PathBuf::from("cli-out")),
        config_file: Some(config),
        strict_endpoints: Some(false),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(settings.output_dir, PathBuf::from("cli-out"));
    assert_eq!(settings.endpoint_policy, EndpointPolicy::Tolerate);
}

#[test]
fn test_empty_config_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = dir.path().join(CONFIG_FILENAME);
    fs::write(&config, "").unwrap();

    let settings = Settings::from_sources(SettingsSources {
        config_file: Some(config),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(settings.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
}

#[test]
fn test_non_mapping_config_is_rejected() {
    let dir = tempdir().unwrap();
    let config = dir.path().join(CONFIG_FILENAME);
    fs::write(&config, "- just\n- a list\n").unwrap();

    let err = Settings::from_sources(SettingsSources {
        config_file: Some(config.clone()),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidShape(path) if path == config));
}

#[test]
fn test_missing_explicit_config_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Settings::from_sources(SettingsSources {
        config_file: Some(dir.path().join("nope.yaml")),
        ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_resolve_output_dir() {
    let settings = Settings::default().with_output_dir("dist");
    assert_eq!(
        settings.resolve_output_dir(Some(Path::new("/work"))),
        PathBuf::from("/work/dist")
    );
    assert!(settings.resolve_output_dir(None).is_absolute());

    let absolute = Settings::default().with_output_dir("/srv/out");
    assert_eq!(
        absolute.resolve_output_dir(Some(Path::new("/work"))),
        PathBuf::from("/srv/out")
    );
}
