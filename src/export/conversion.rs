use super::document::{DocumentMetadata, FlowDocument};
use crate::error::ParseError;

/// A trait for export formats that can be converted into a `FlowDocument`.
///
/// This is the extension point that keeps the pipeline format-agnostic: the
/// bundled `RawExport` implements it for LangFlow JSON, and any other export
/// format only has to provide the same translation.
///
/// # Example
///
/// ```rust
/// use flowcast::export::{DocumentMetadata, DocumentNode, FlowDocument, IntoDocument};
/// use flowcast::error::ParseError;
///
/// struct MyStep { name: String }
/// struct MyPipeline { steps: Vec<MyStep> }
///
/// impl IntoDocument for MyPipeline {
///     fn into_document(self, metadata: DocumentMetadata) -> Result<FlowDocument, ParseError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|step| DocumentNode {
///                 id: step.name,
///                 node_type: "Step".to_string(),
///                 config: Default::default(),
///             })
///             .collect();
///         Ok(FlowDocument {
///             flow_id: "pipeline".to_string(),
///             name: "Pipeline".to_string(),
///             version: "1.0.0".to_string(),
///             description: None,
///             tags: vec![],
///             nodes,
///             edges: vec![],
///             metadata,
///         })
///     }
/// }
/// ```
pub trait IntoDocument {
    /// Consumes the object and converts it into a canonical flow document.
    fn into_document(self, metadata: DocumentMetadata) -> Result<FlowDocument, ParseError>;
}
