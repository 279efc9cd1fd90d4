use crate::error::{DanglingEndpoint, ValidationError};
use crate::export::ConfigMap;
use ahash::AHashSet;
use std::path::{Path, PathBuf};

/// Normalized representation of a graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct IrNode {
    id: String,
    node_type: String,
    config: ConfigMap,
}

impl IrNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>, config: ConfigMap) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }
}

/// Normalized representation of a directed graph edge.
#[derive(Debug, Clone, PartialEq)]
pub struct IrEdge {
    id: String,
    source: String,
    target: String,
    config: ConfigMap,
}

impl IrEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        config: ConfigMap,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }
}

/// Origin of the IR and the directory generated projects land in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrMetadata {
    source_path: PathBuf,
    output_dir: PathBuf,
}

impl IrMetadata {
    pub fn new(source_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// The normalized, read-only flow graph shared by analysis and generation.
///
/// Node and edge order is declaration order. It does not affect classification
/// but keeps generated output deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct IntermediateRepresentation {
    flow_id: String,
    name: String,
    version: String,
    nodes: Vec<IrNode>,
    edges: Vec<IrEdge>,
    metadata: IrMetadata,
}

impl IntermediateRepresentation {
    pub fn new(
        flow_id: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        nodes: Vec<IrNode>,
        edges: Vec<IrEdge>,
        metadata: IrMetadata,
    ) -> Self {
        Self {
            flow_id: flow_id.into(),
            name: name.into(),
            version: version.into(),
            nodes,
            edges,
            metadata,
        }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn nodes(&self) -> &[IrNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[IrEdge] {
        &self.edges
    }

    pub fn metadata(&self) -> &IrMetadata {
        &self.metadata
    }

    /// The display name, or the flow id when the name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.flow_id
        } else {
            &self.name
        }
    }

    pub fn node(&self, id: &str) -> Option<&IrNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_ids(&self) -> AHashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn edge_ids(&self) -> AHashSet<&str> {
        self.edges.iter().map(|e| e.id.as_str()).collect()
    }

    /// Edge endpoints that name no declared node, in edge order (source before target).
    pub fn dangling_endpoints(&self) -> Vec<DanglingEndpoint> {
        let declared = self.node_ids();
        self.edges
            .iter()
            .flat_map(|edge| [(edge, &edge.source), (edge, &edge.target)])
            .filter(|(_, endpoint)| !declared.contains(endpoint.as_str()))
            .map(|(edge, endpoint)| DanglingEndpoint {
                edge_id: edge.id.clone(),
                node_id: endpoint.clone(),
            })
            .collect()
    }

    /// Fails when any edge references an undeclared node.
    pub fn validate_endpoints(&self) -> Result<(), ValidationError> {
        let dangling = self.dangling_endpoints();
        if dangling.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::DanglingEndpoints(dangling))
        }
    }
}
