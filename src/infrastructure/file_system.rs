use crate::core::interfaces::FileSystemService;
use crate::utils::{Result, RiggingError};
use async_trait::async_trait;
use std::path::Path;

/// Tokio-based file system implementation
pub struct TokioFileSystemService;

#[async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn read_file(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(RiggingError::Io)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
