use ahash::AHashMap;
use std::path::PathBuf;

/// Open per-node / per-edge configuration, keyed by field name.
pub type ConfigMap = AHashMap<String, serde_json::Value>;

/// The canonical, format-agnostic form of a flow export.
/// This is the input of the IR builder; any custom export format converts into it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDocument {
    pub flow_id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub nodes: Vec<DocumentNode>,
    pub edges: Vec<DocumentEdge>,
    pub metadata: DocumentMetadata,
}

/// A single node of the exported graph.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    pub id: String,
    pub node_type: String,
    pub config: ConfigMap,
}

/// A directed connection between two nodes of the exported graph.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub config: ConfigMap,
}

/// Where the export came from and where generated artifacts should go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
}
