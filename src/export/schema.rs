use super::conversion::IntoDocument;
use super::document::{ConfigMap, DocumentEdge, DocumentMetadata, DocumentNode, FlowDocument};
use crate::error::ParseError;
use serde::Deserialize;
use serde_json::Value;

// --- Raw export structs (LangFlow JSON format) ---
// Every field is optional here so that missing or mistyped fields surface as
// distinct `ParseError` kinds instead of a generic serde message.

/// Top-level export document as found on disk.
#[derive(Debug, Deserialize)]
pub struct RawExport {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub description: Option<Value>,
    pub tags: Option<Value>,
    pub version: Option<Value>,
    pub last_tested_version: Option<Value>,
    pub nodes: Option<Value>,
    pub edges: Option<Value>,
    pub data: Option<Value>,
}

/// The `data` block that newer exports nest the graph under.
#[derive(Debug, Deserialize)]
struct RawGraph {
    nodes: Option<Value>,
    edges: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Option<Value>,
    #[serde(rename = "type")]
    node_type: Option<Value>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    id: Option<Value>,
    source: Option<Value>,
    target: Option<Value>,
    data: Option<Value>,
}

impl RawExport {
    /// The declared schema version, falling back to `last_tested_version`.
    pub fn declared_version(&self) -> Option<String> {
        self.version
            .as_ref()
            .or(self.last_tested_version.as_ref())
            .map(stringify)
    }
}

impl IntoDocument for RawExport {
    fn into_document(self, metadata: DocumentMetadata) -> Result<FlowDocument, ParseError> {
        const CONTEXT: &str = "export";

        let flow_id = require(self.id.as_ref(), "id", CONTEXT)?;
        let name = require(self.name.as_ref(), "name", CONTEXT)?;
        let version = self.declared_version().ok_or_else(|| missing("version", CONTEXT))?;
        let description = self.description.as_ref().map(stringify);

        let tags = match self.tags {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().map(stringify).collect(),
            Some(_) => return Err(invalid("tags", CONTEXT, "a list")),
        };

        let mut nodes_raw = self.nodes;
        let mut edges_raw = self.edges;
        if nodes_raw.is_none() || edges_raw.is_none() {
            if let Some(data @ Value::Object(_)) = self.data {
                let graph: RawGraph = serde_json::from_value(data)?;
                nodes_raw = nodes_raw.or(graph.nodes);
                edges_raw = edges_raw.or(graph.edges);
            }
        }

        let nodes = list_items(nodes_raw, "nodes", CONTEXT)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| convert_node(item, index))
            .collect::<Result<Vec<_>, _>>()?;
        let edges = list_items(edges_raw, "edges", CONTEXT)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| convert_edge(item, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FlowDocument {
            flow_id,
            name,
            version,
            description,
            tags,
            nodes,
            edges,
            metadata,
        })
    }
}

fn convert_node(item: Value, index: usize) -> Result<DocumentNode, ParseError> {
    let context = format!("node #{}", index);
    if !item.is_object() {
        return Err(invalid("nodes", "export", "a list of objects"));
    }
    let raw: RawNode = serde_json::from_value(item)?;
    let id = require(raw.id.as_ref(), "id", &context)?;
    let config = config_map(raw.data, &context)?;

    // Older exports only carry the type inside `data`.
    let node_type = raw
        .node_type
        .filter(|t| !t.is_null())
        .or_else(|| config.get("type").cloned())
        .map(|t| stringify(&t))
        .ok_or_else(|| missing("type", &context))?;

    Ok(DocumentNode {
        id,
        node_type,
        config,
    })
}

fn convert_edge(item: Value, index: usize) -> Result<DocumentEdge, ParseError> {
    let context = format!("edge #{}", index);
    if !item.is_object() {
        return Err(invalid("edges", "export", "a list of objects"));
    }
    let raw: RawEdge = serde_json::from_value(item)?;
    Ok(DocumentEdge {
        id: require(raw.id.as_ref(), "id", &context)?,
        source: require(raw.source.as_ref(), "source", &context)?,
        target: require(raw.target.as_ref(), "target", &context)?,
        config: config_map(raw.data, &context)?,
    })
}

fn list_items(raw: Option<Value>, field: &str, context: &str) -> Result<Vec<Value>, ParseError> {
    match raw {
        None => Err(missing(field, context)),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(invalid(field, context, "a list")),
    }
}

fn config_map(raw: Option<Value>, context: &str) -> Result<ConfigMap, ParseError> {
    match raw {
        None | Some(Value::Null) => Ok(ConfigMap::new()),
        Some(Value::Object(map)) => Ok(map.into_iter().collect()),
        Some(_) => Err(invalid("data", context, "a mapping")),
    }
}

fn require(value: Option<&Value>, field: &str, context: &str) -> Result<String, ParseError> {
    value.map(stringify).ok_or_else(|| missing(field, context))
}

/// Renders a JSON scalar the way it should appear as an identifier.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn missing(field: &str, context: &str) -> ParseError {
    ParseError::MissingField {
        field: field.to_string(),
        context: context.to_string(),
    }
}

fn invalid(field: &str, context: &str, expected: &str) -> ParseError {
    ParseError::InvalidShape {
        field: field.to_string(),
        context: context.to_string(),
        expected: expected.to_string(),
    }
}
