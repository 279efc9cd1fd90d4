//! Tests for building the intermediate representation.
mod common;
use common::*;
use flowcast::prelude::*;
use serde_json::json;

#[test]
fn test_ir_preserves_declaration_order() {
    let ir = build_intermediate_representation(&create_branching_document());

    let node_ids: Vec<_> = ir.nodes().iter().map(|n| n.id()).collect();
    assert_eq!(node_ids, ["start", "middle", "end"]);
    let edges: Vec<_> = ir
        .edges()
        .iter()
        .map(|e| (e.id(), e.source(), e.target()))
        .collect();
    assert_eq!(
        edges,
        [("e0", "start", "middle"), ("e1", "middle", "end"), ("e2", "start", "end")]
    );
    assert_eq!(ir.flow_id(), "test-flow");
    assert_eq!(ir.version(), "1.5.1");
    assert_eq!(ir.metadata().output_dir(), Path::new("dist"));
}

#[test]
fn test_ir_config_is_independent_of_document() {
    let mut document = create_linear_document();
    document.nodes[0]
        .config
        .insert("temperature".to_string(), json!(0.2));

    let ir = build_intermediate_representation(&document);
    document.nodes[0]
        .config
        .insert("temperature".to_string(), json!(0.9));
    document.nodes[0].config.insert("extra".to_string(), json!(true));

    let config = ir.nodes()[0].config();
    assert_eq!(config.get("temperature"), Some(&json!(0.2)));
    assert!(!config.contains_key("extra"));
}

#[test]
fn test_ir_from_document_reference() {
    let document = create_linear_document();
    let ir = IntermediateRepresentation::from(&document);
    assert_eq!(ir, build_intermediate_representation(&document));
}

#[test]
fn test_display_name_falls_back_to_flow_id() {
    let mut document = create_linear_document();
    assert_eq!(
        build_intermediate_representation(&document).display_name(),
        "Test Flow"
    );

    document.name = "   ".to_string();
    assert_eq!(
        build_intermediate_representation(&document).display_name(),
        "test-flow"
    );
}

#[test]
fn test_node_lookup_and_id_sets() {
    let ir = build_intermediate_representation(&create_linear_document());

    assert_eq!(ir.node("middle").map(|n| n.node_type()), Some("Component"));
    assert!(ir.node("missing").is_none());
    assert_eq!(ir.node_ids().len(), 3);
    assert!(ir.edge_ids().contains("e1"));
}

#[test]
fn test_dangling_endpoints_are_tolerated_and_reported() {
    let ir = create_ir(&["a"], &[("a", "ghost"), ("phantom", "a")]);

    let dangling = ir.dangling_endpoints();
    assert_eq!(dangling.len(), 2);
    assert_eq!(dangling[0].edge_id, "e0");
    assert_eq!(dangling[0].node_id, "ghost");
    assert_eq!(dangling[1].edge_id, "e1");
    assert_eq!(dangling[1].node_id, "phantom");

    match ir.validate_endpoints() {
        Err(ValidationError::DanglingEndpoints(endpoints)) => assert_eq!(endpoints, dangling),
        other => panic!("expected dangling endpoints, got {:?}", other),
    }
}

#[test]
fn test_validate_endpoints_accepts_closed_graph() {
    let ir = build_intermediate_representation(&create_branching_document());
    assert!(ir.dangling_endpoints().is_empty());
    assert!(ir.validate_endpoints().is_ok());
}

#[test]
fn test_ir_can_be_built_directly() {
    let ir = IntermediateRepresentation::new(
        "direct",
        "",
        "1.0.0",
        vec![
            IrNode::new("a", "Input", ConfigMap::new()),
            IrNode::new("b", "Output", ConfigMap::new()),
        ],
        vec![IrEdge::new("ab", "a", "b", ConfigMap::new())],
        IrMetadata::new("direct.json", "out"),
    );

    assert_eq!(ir.display_name(), "direct");
    assert_eq!(analyze_flow(&ir).pattern, FlowPattern::Linear);
}
