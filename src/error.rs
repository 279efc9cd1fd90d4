use crate::scaffold::WriteResult;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning an export file into a `FlowDocument`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Could not read export file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse export JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    #[error("Field '{field}' in {context} has the wrong shape: expected {expected}")]
    InvalidShape {
        field: String,
        context: String,
        expected: String,
    },

    #[error("Unsupported export version '{found}'. Supported: {supported}")]
    UnsupportedVersion { found: String, supported: String },
}

/// Errors raised while loading settings from a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config file '{0}' must contain a mapping at the top level")]
    InvalidShape(PathBuf),
}

/// Errors raised by the optional referential check on edge endpoints.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("{} edge endpoint(s) reference undeclared nodes: {}", .0.len(), format_endpoints(.0))]
    DanglingEndpoints(Vec<DanglingEndpoint>),
}

/// An edge endpoint that names a node absent from the node collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingEndpoint {
    pub edge_id: String,
    pub node_id: String,
}

fn format_endpoints(endpoints: &[DanglingEndpoint]) -> String {
    endpoints
        .iter()
        .map(|e| format!("'{}' (edge '{}')", e.node_id, e.edge_id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// What a failed batch already did to disk and what it never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchProgress {
    /// Results for files processed before the failure, in input order.
    pub committed: Vec<WriteResult>,
    /// Absolute paths of the failing file and every file after it.
    pub not_reached: Vec<PathBuf>,
}

impl BatchProgress {
    /// Results that actually changed something on disk.
    pub fn changed_on_disk(&self) -> impl Iterator<Item = &WriteResult> {
        self.committed.iter().filter(|r| r.status.touches_disk())
    }
}

/// Errors raised by the scaffold writer. Every batch-level failure carries the
/// progress made so far, since files written earlier are not rolled back.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Generated files must use relative paths, got '{0}'")]
    AbsolutePath(PathBuf),

    #[error("Refusing to overwrite existing file without --overwrite: {path}")]
    Conflict {
        path: PathBuf,
        progress: BatchProgress,
    },

    #[error("Cannot inject TODO markers for unsupported file type: {extension}")]
    UnsupportedAnnotationTarget {
        path: PathBuf,
        extension: String,
        progress: BatchProgress,
    },

    #[error("Filesystem error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        progress: BatchProgress,
    },
}

impl ScaffoldError {
    /// The batch progress attached to this error, if it happened mid-batch.
    pub fn progress(&self) -> Option<&BatchProgress> {
        match self {
            ScaffoldError::AbsolutePath(_) => None,
            ScaffoldError::Conflict { progress, .. }
            | ScaffoldError::UnsupportedAnnotationTarget { progress, .. }
            | ScaffoldError::Io { progress, .. } => Some(progress),
        }
    }
}

/// Errors raised while persisting a conversion report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Could not write report '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by the end-to-end conversion pipeline.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("Generator '{generator}' cannot handle {pattern} flows")]
    UnsupportedPattern {
        generator: &'static str,
        pattern: crate::analysis::FlowPattern,
    },
}
