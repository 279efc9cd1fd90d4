use super::model::{IntermediateRepresentation, IrEdge, IrMetadata, IrNode};
use crate::export::FlowDocument;

/// Constructs an IR from a parsed flow document.
///
/// Every configuration map is cloned, so the IR never observes later changes to
/// the document it was built from. This cannot fail.
pub fn build_intermediate_representation(document: &FlowDocument) -> IntermediateRepresentation {
    let nodes = document
        .nodes
        .iter()
        .map(|node| IrNode::new(node.id.clone(), node.node_type.clone(), node.config.clone()))
        .collect();
    let edges = document
        .edges
        .iter()
        .map(|edge| {
            IrEdge::new(
                edge.id.clone(),
                edge.source.clone(),
                edge.target.clone(),
                edge.config.clone(),
            )
        })
        .collect();
    let metadata = IrMetadata::new(
        document.metadata.source_path.clone(),
        document.metadata.output_dir.clone(),
    );

    tracing::debug!(
        flow_id = %document.flow_id,
        nodes = document.nodes.len(),
        edges = document.edges.len(),
        "built intermediate representation"
    );

    IntermediateRepresentation::new(
        document.flow_id.clone(),
        document.name.clone(),
        document.version.clone(),
        nodes,
        edges,
        metadata,
    )
}

impl From<&FlowDocument> for IntermediateRepresentation {
    fn from(document: &FlowDocument) -> Self {
        build_intermediate_representation(document)
    }
}
