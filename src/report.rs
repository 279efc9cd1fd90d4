//! Human- and machine-readable summaries of a conversion.

use crate::analysis::TargetRecommendation;
use crate::convert::ConversionResult;
use crate::error::ReportError;
use crate::scaffold::{WriteResult, WriteStatus};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const MARKDOWN_REPORT: &str = "conversion_report.md";
pub const JSON_REPORT: &str = "conversion_report.json";

/// Single file entry within a conversion report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Path relative to the project root when it lies inside it.
    pub path: PathBuf,
    pub status: WriteStatus,
    pub todos: Vec<String>,
}

/// Structured summary of a flow conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub flow_id: String,
    pub target: TargetRecommendation,
    pub project_root: PathBuf,
    pub entries: Vec<ReportEntry>,
}

/// Locations of persisted report files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub markdown: PathBuf,
    pub json: PathBuf,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    flow_id: &'a str,
    target: TargetRecommendation,
    project_root: &'a Path,
    counts: BTreeMap<WriteStatus, usize>,
    files: &'a [ReportEntry],
}

impl ConversionReport {
    pub fn new(
        flow_id: impl Into<String>,
        target: TargetRecommendation,
        project_root: impl Into<PathBuf>,
        writes: &[WriteResult],
    ) -> Self {
        let project_root = project_root.into();
        let entries = writes
            .iter()
            .map(|write| ReportEntry {
                path: write
                    .path
                    .strip_prefix(&project_root)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| write.path.clone()),
                status: write.status,
                todos: write.todos.clone(),
            })
            .collect();
        Self {
            flow_id: flow_id.into(),
            target,
            project_root,
            entries,
        }
    }

    pub fn from_result(result: &ConversionResult) -> Self {
        Self::new(
            result.flow_id.clone(),
            result.analysis.recommended_target,
            result.project_root.clone(),
            &result.writes,
        )
    }

    /// Number of entries per status; statuses that never occur are absent.
    pub fn counts(&self) -> BTreeMap<WriteStatus, usize> {
        self.entries
            .iter()
            .map(|entry| entry.status)
            .counts()
            .into_iter()
            .collect()
    }

    pub fn count(&self, status: WriteStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    pub fn render_markdown(&self) -> String {
        let mut lines = vec![
            format!("# Conversion Report for `{}`", self.flow_id),
            String::new(),
            format!("- Target: {}", self.target),
            format!("- Project root: `{}`", self.project_root.display()),
            format!("- Files created: {}", self.count(WriteStatus::Created)),
            format!("- Files updated: {}", self.count(WriteStatus::Updated)),
            format!("- Files unchanged: {}", self.count(WriteStatus::Unchanged)),
        ];
        let planned = self.count(WriteStatus::WouldCreate) + self.count(WriteStatus::WouldUpdate);
        if planned > 0 {
            lines.push(format!("- Files pending (dry run): {}", planned));
        }
        lines.extend([
            String::new(),
            "## Files".to_string(),
            "| Path | Status | TODOs |".to_string(),
            "| --- | --- | --- |".to_string(),
        ]);
        for entry in &self.entries {
            lines.push(format!(
                "| {} | {} | {} |",
                entry.path.display(),
                entry.status,
                entry.todos.join("<br />")
            ));
        }
        lines.join("\n") + "\n"
    }

    pub fn render_json(&self) -> Result<String, ReportError> {
        let payload = JsonReport {
            flow_id: &self.flow_id,
            target: self.target,
            project_root: &self.project_root,
            counts: self.counts(),
            files: &self.entries,
        };
        Ok(serde_json::to_string_pretty(&payload)? + "\n")
    }

    /// Writes both report files into `destination`, or the project root.
    pub fn write(&self, destination: Option<&Path>) -> Result<ReportArtifacts, ReportError> {
        let output_dir = destination.unwrap_or(self.project_root.as_path());
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ReportError::Io { path, source }
        };
        fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;

        let markdown = output_dir.join(MARKDOWN_REPORT);
        let json = output_dir.join(JSON_REPORT);
        fs::write(&markdown, self.render_markdown()).map_err(io_error(&markdown))?;
        fs::write(&json, self.render_json()?).map_err(io_error(&json))?;
        tracing::debug!(markdown = %markdown.display(), json = %json.display(), "wrote conversion report");

        Ok(ReportArtifacts { markdown, json })
    }
}
