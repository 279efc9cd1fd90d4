use super::render::{UnsupportedExtension, render_content};
use super::{GeneratedFile, ScaffoldWriter, WriteResult, WriteStatus};
use crate::error::{BatchProgress, ScaffoldError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Writes generated project files with idempotent semantics.
///
/// ```rust,no_run
/// use flowcast::scaffold::{GeneratedFile, ProjectScaffoldWriter, ScaffoldWriter};
///
/// let writer = ProjectScaffoldWriter::new("dist/demo").overwrite(true);
/// let files = vec![GeneratedFile::new("README.md", "# Demo")?];
/// for result in writer.write_files(&files)? {
///     println!("{} {}", result.status, result.path.display());
/// }
/// # Ok::<(), flowcast::error::ScaffoldError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProjectScaffoldWriter {
    root: PathBuf,
    overwrite: bool,
    dry_run: bool,
}

/// What a single file needs, decided before any write happens.
enum Plan {
    Create,
    Keep,
    Replace,
}

impl ProjectScaffoldWriter {
    /// Creates a writer rooted at `root`. Relative roots are made absolute
    /// against the current directory; nothing is created yet.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            root: std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf()),
            overwrite: false,
            dry_run: false,
        }
    }

    /// Allows replacing existing files whose content differs.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Computes statuses without touching the filesystem.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    fn target_path(&self, file: &GeneratedFile) -> PathBuf {
        self.root.join(file.relative_path())
    }

    /// Snapshot of the batch at the moment file `failed_at` could not be processed.
    fn progress(
        &self,
        committed: Vec<WriteResult>,
        files: &[GeneratedFile],
        failed_at: usize,
    ) -> BatchProgress {
        BatchProgress {
            committed,
            not_reached: files[failed_at..]
                .iter()
                .map(|f| self.target_path(f))
                .collect(),
        }
    }

    fn plan(&self, target: &Path, content: &str) -> Result<Plan, std::io::Error> {
        match fs::read(target) {
            Ok(existing) if existing == content.as_bytes() => Ok(Plan::Keep),
            Ok(_) => Ok(Plan::Replace),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Plan::Create),
            Err(e) => Err(e),
        }
    }

    fn persist(&self, target: &Path, content: &str) -> Result<(), std::io::Error> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(target, content)
    }
}

impl ScaffoldWriter for ProjectScaffoldWriter {
    fn root(&self) -> &Path {
        &self.root
    }

    fn write_files(&self, files: &[GeneratedFile]) -> Result<Vec<WriteResult>, ScaffoldError> {
        let mut results: Vec<WriteResult> = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            let target = self.target_path(file);

            let content = match render_content(&target, file) {
                Ok(content) => content,
                Err(UnsupportedExtension(extension)) => {
                    return Err(ScaffoldError::UnsupportedAnnotationTarget {
                        path: target,
                        extension,
                        progress: self.progress(results, files, index),
                    });
                }
            };

            let plan = match self.plan(&target, &content) {
                Ok(plan) => plan,
                Err(source) => {
                    return Err(ScaffoldError::Io {
                        path: target,
                        source,
                        progress: self.progress(results, files, index),
                    });
                }
            };

            let status = match plan {
                Plan::Keep => WriteStatus::Unchanged,
                Plan::Replace if !self.overwrite => {
                    tracing::warn!(path = %target.display(), "refusing to overwrite diverged file");
                    return Err(ScaffoldError::Conflict {
                        path: target,
                        progress: self.progress(results, files, index),
                    });
                }
                Plan::Replace if self.dry_run => WriteStatus::WouldUpdate,
                Plan::Replace => WriteStatus::Updated,
                Plan::Create if self.dry_run => WriteStatus::WouldCreate,
                Plan::Create => WriteStatus::Created,
            };

            if status.touches_disk() {
                if let Err(source) = self.persist(&target, &content) {
                    return Err(ScaffoldError::Io {
                        path: target,
                        source,
                        progress: self.progress(results, files, index),
                    });
                }
            }

            tracing::debug!(path = %target.display(), %status, "scaffold file processed");
            results.push(WriteResult {
                path: target,
                status,
                todos: file.todos().to_vec(),
            });
        }

        Ok(results)
    }
}
