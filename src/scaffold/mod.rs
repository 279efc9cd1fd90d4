//! Idempotent materialization of generated project files.
//!
//! Each file is handled independently: missing files are created, identical
//! files are left alone, and diverging files are only replaced with explicit
//! overwrite permission. A failing file aborts the batch without rolling back
//! the files before it; the error reports exactly how far the batch got.

mod render;
mod writer;

pub use render::{TODO_MARKER, comment_leader};
pub use writer::ProjectScaffoldWriter;

use crate::error::ScaffoldError;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Descriptor for a file a generator wants materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    relative_path: PathBuf,
    content: String,
    todos: Vec<String>,
}

impl GeneratedFile {
    /// Creates a descriptor. Absolute paths are rejected.
    pub fn new(
        relative_path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<Self, ScaffoldError> {
        let relative_path = relative_path.into();
        if relative_path.is_absolute() || relative_path.has_root() {
            return Err(ScaffoldError::AbsolutePath(relative_path));
        }
        Ok(Self {
            relative_path,
            content: content.into(),
            todos: Vec::new(),
        })
    }

    /// Attaches advisory annotations, embedded as a leading comment block.
    pub fn with_todos<I, S>(mut self, todos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.todos.extend(todos.into_iter().map(Into::into));
        self
    }

    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn todos(&self) -> &[String] {
        &self.todos
    }
}

/// Outcome of persisting one generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteStatus {
    Created,
    Updated,
    Unchanged,
    WouldCreate,
    WouldUpdate,
}

impl WriteStatus {
    pub const ALL: [WriteStatus; 5] = [
        WriteStatus::Created,
        WriteStatus::Updated,
        WriteStatus::Unchanged,
        WriteStatus::WouldCreate,
        WriteStatus::WouldUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WriteStatus::Created => "created",
            WriteStatus::Updated => "updated",
            WriteStatus::Unchanged => "unchanged",
            WriteStatus::WouldCreate => "would-create",
            WriteStatus::WouldUpdate => "would-update",
        }
    }

    /// Whether this status means bytes were written to disk.
    pub fn touches_disk(&self) -> bool {
        matches!(self, WriteStatus::Created | WriteStatus::Updated)
    }

    pub fn is_dry_run(&self) -> bool {
        matches!(self, WriteStatus::WouldCreate | WriteStatus::WouldUpdate)
    }
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Result of attempting to persist a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Absolute path of the target file.
    pub path: PathBuf,
    pub status: WriteStatus,
    pub todos: Vec<String>,
}

/// Persists generated files under a destination root.
///
/// The conversion pipeline only talks to this trait, so planning and analysis
/// stay testable without touching disk.
pub trait ScaffoldWriter {
    /// The absolute destination root.
    fn root(&self) -> &Path;

    /// Processes `files` strictly in order; results match input order.
    fn write_files(&self, files: &[GeneratedFile]) -> Result<Vec<WriteResult>, ScaffoldError>;
}
