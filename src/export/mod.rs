//! Parsing of flow exports into the canonical `FlowDocument`.
//!
//! Structural problems (malformed JSON, missing fields, wrong shapes, unsupported
//! schema versions) are reported here as distinct `ParseError` kinds, before any
//! of the core stages run.

pub mod conversion;
pub mod document;
pub mod schema;

pub use conversion::*;
pub use document::*;
pub use schema::RawExport;

use crate::config::Settings;
use crate::error::ParseError;
use std::fs;
use std::path::Path;

/// Export schema versions accepted by default.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0.0", "1.5.1"];

/// Options controlling how strictly an export is accepted.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Accepted schema versions; an empty list accepts every version.
    pub supported_versions: Vec<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            supported_versions: SUPPORTED_VERSIONS.iter().map(|v| v.to_string()).collect(),
        }
    }
}

impl ParseOptions {
    /// Accepts exports of any schema version.
    pub fn any_version() -> Self {
        Self {
            supported_versions: Vec::new(),
        }
    }

    fn check_version(&self, version: &str) -> Result<(), ParseError> {
        if self.supported_versions.is_empty() || self.supported_versions.iter().any(|v| v == version) {
            return Ok(());
        }
        Err(ParseError::UnsupportedVersion {
            found: version.to_string(),
            supported: self.supported_versions.join(", "),
        })
    }
}

/// Parses an export from a JSON string.
pub fn parse_export_str(
    json: &str,
    metadata: DocumentMetadata,
    options: &ParseOptions,
) -> Result<FlowDocument, ParseError> {
    let raw: RawExport = serde_json::from_str(json)?;
    let document = raw.into_document(metadata)?;
    options.check_version(&document.version)?;
    tracing::debug!(
        flow_id = %document.flow_id,
        version = %document.version,
        nodes = document.nodes.len(),
        edges = document.edges.len(),
        "parsed flow export"
    );
    Ok(document)
}

/// Reads and parses an export file, resolving the output directory from `settings`.
pub fn parse_export_file(
    path: &Path,
    settings: &Settings,
    options: &ParseOptions,
) -> Result<FlowDocument, ParseError> {
    let json = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let metadata = DocumentMetadata {
        source_path: path.to_path_buf(),
        output_dir: settings.resolve_output_dir(None),
    };
    parse_export_str(&json, metadata, options)
}
