//! Common test utilities for building flow documents and exports.
use flowcast::prelude::*;
use serde_json::json;

/// Creates a document with bare nodes and edges named `e0`, `e1`, ...
#[allow(dead_code)]
pub fn create_document(nodes: &[&str], edges: &[(&str, &str)]) -> FlowDocument {
    FlowDocument {
        flow_id: "test-flow".to_string(),
        name: "Test Flow".to_string(),
        version: "1.5.1".to_string(),
        description: None,
        tags: vec![],
        nodes: nodes
            .iter()
            .map(|id| DocumentNode {
                id: id.to_string(),
                node_type: "Component".to_string(),
                config: ConfigMap::new(),
            })
            .collect(),
        edges: edges
            .iter()
            .enumerate()
            .map(|(i, (source, target))| DocumentEdge {
                id: format!("e{}", i),
                source: source.to_string(),
                target: target.to_string(),
                config: ConfigMap::new(),
            })
            .collect(),
        metadata: DocumentMetadata {
            source_path: PathBuf::from("test-flow.json"),
            output_dir: PathBuf::from("dist"),
        },
    }
}

/// Builds the IR for a bare graph.
#[allow(dead_code)]
pub fn create_ir(nodes: &[&str], edges: &[(&str, &str)]) -> IntermediateRepresentation {
    build_intermediate_representation(&create_document(nodes, edges))
}

/// Linear flow: `start -> middle -> end`.
#[allow(dead_code)]
pub fn create_linear_document() -> FlowDocument {
    create_document(
        &["start", "middle", "end"],
        &[("start", "middle"), ("middle", "end")],
    )
}

/// Branching flow: `start` fans out to `middle` and `end`.
#[allow(dead_code)]
pub fn create_branching_document() -> FlowDocument {
    create_document(
        &["start", "middle", "end"],
        &[("start", "middle"), ("middle", "end"), ("start", "end")],
    )
}

/// A two-node export in the current LangFlow layout, graph nested under `data`.
#[allow(dead_code)]
pub fn simple_export_json() -> String {
    json!({
        "id": "simple-passthrough",
        "name": "Simple Passthrough",
        "description": "Echoes chat input",
        "tags": ["demo"],
        "last_tested_version": "1.5.1",
        "data": {
            "nodes": [
                {"id": "ChatInput-1", "type": "genericNode", "data": {"type": "ChatInput", "input_value": "hi"}},
                {"id": "ChatOutput-2", "type": "genericNode", "data": {"type": "ChatOutput"}}
            ],
            "edges": [
                {"id": "edge-1", "source": "ChatInput-1", "target": "ChatOutput-2", "data": {"sourceHandle": "message"}}
            ]
        }
    })
    .to_string()
}

/// A branching export whose model node carries an API key.
#[allow(dead_code)]
pub fn branching_export_json() -> String {
    json!({
        "id": "price-deal-finder",
        "name": "Price Deal Finder",
        "version": "1.0.0",
        "nodes": [
            {"id": "input", "type": "ChatInput", "data": {}},
            {"id": "search", "type": "WebSearch", "data": {"api_key": "sk-demo"}},
            {"id": "compare", "type": "Prompt", "data": {}},
            {"id": "output", "type": "ChatOutput", "data": null}
        ],
        "edges": [
            {"id": "e1", "source": "input", "target": "search"},
            {"id": "e2", "source": "input", "target": "compare"},
            {"id": "e3", "source": "search", "target": "compare"},
            {"id": "e4", "source": "compare", "target": "output"}
        ]
    })
    .to_string()
}

#[allow(dead_code)]
pub fn metadata(output_dir: &Path) -> DocumentMetadata {
    DocumentMetadata {
        source_path: PathBuf::from("flow.json"),
        output_dir: output_dir.to_path_buf(),
    }
}
