//! Filesystem-based output service implementation

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::{ApplicationError, OutputService};
use crate::generation::Artifact;

/// Output service writing artifacts below a root directory.
///
/// Each artifact is written to a temporary file in its target directory and renamed
/// into place, so readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct FileSystemOutputService {
    root: PathBuf,
}

impl FileSystemOutputService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn persist_atomically(dir: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    temp.flush()?;
    temp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write_artifact(&self, artifact: &Artifact) -> Result<PathBuf, ApplicationError> {
        let target = self.root.join(&artifact.path);
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());

        fs::create_dir_all(&dir).await.map_err(|e| {
            ApplicationError::OutputError(format!(
                "Failed to create directory {}: {e}",
                dir.display()
            ))
        })?;

        let content = artifact.content.clone().into_bytes();
        let destination = target.clone();
        tokio::task::spawn_blocking(move || persist_atomically(&dir, &destination, &content))
            .await
            .map_err(|e| ApplicationError::OutputError(format!("Write task failed: {e}")))?
            .map_err(|e| {
                ApplicationError::OutputError(format!(
                    "Failed to write file {}: {e}",
                    target.display()
                ))
            })?;

        tracing::debug!(path = %target.display(), bytes = artifact.content.len(), "Artifact written");
        Ok(target)
    }
}
