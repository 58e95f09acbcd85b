//! Output service implementations

pub mod filesystem_output;

pub use filesystem_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, OutputService};
    use crate::generation::Artifact;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_output_write_artifact() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new(temp_dir.path());

        let artifact = Artifact {
            path: PathBuf::from("petstore").join("api.json"),
            content: "{}\n".to_string(),
        };

        let written = output_service.write_artifact(&artifact).await.unwrap();
        assert_eq!(written, temp_dir.path().join("petstore/api.json"));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "{}\n");

        // Only the final file remains in the target directory
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path().join("petstore"))
            .unwrap()
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_filesystem_output_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new(temp_dir.path());

        for content in ["first", "second"] {
            let artifact = Artifact {
                path: PathBuf::from("api.rs"),
                content: content.to_string(),
            };
            output_service.write_artifact(&artifact).await.unwrap();
        }

        let content = std::fs::read_to_string(temp_dir.path().join("api.rs")).unwrap();
        assert_eq!(content, "second");
    }

    #[tokio::test]
    async fn test_filesystem_output_unwritable_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let output_service = FileSystemOutputService::new(&blocker);
        let artifact = Artifact {
            path: PathBuf::from("ns").join("api.json"),
            content: String::new(),
        };

        let err = output_service.write_artifact(&artifact).await.unwrap_err();
        assert!(matches!(err, ApplicationError::OutputError(_)));
    }
}
