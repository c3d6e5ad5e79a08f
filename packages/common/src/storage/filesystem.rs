use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::error::StorageError;
use super::naming::{is_flat_name, sanitize_file_name};
use super::traits::{ImageStore, StoredImage};

/// Filesystem-backed image store.
///
/// Images live flat in `{base_path}/{uuid-v7}-{sanitized original name}` and
/// are addressed publicly as `{public_prefix}/{file name}`.
pub struct FilesystemImageStore {
    base_path: PathBuf,
    public_prefix: String,
    max_size: u64,
}

impl FilesystemImageStore {
    /// Create a new filesystem image store, creating its directories.
    pub async fn new(
        base_path: PathBuf,
        public_prefix: &str,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            public_prefix: normalize_prefix(public_prefix),
            max_size,
        })
    }

    /// Map a public path back to a file inside the store.
    fn resolve(&self, public_path: &str) -> Result<PathBuf, StorageError> {
        let name = public_path
            .strip_prefix(self.public_prefix.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidPath(public_path.to_string()))?;

        if !is_flat_name(name) {
            return Err(StorageError::InvalidPath(public_path.to_string()));
        }

        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<StoredImage, StorageError> {
        let size = data.len() as u64;
        if size > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: size,
                limit: self.max_size,
            });
        }

        let file_name = format!(
            "{}-{}",
            uuid::Uuid::now_v7().simple(),
            sanitize_file_name(original_name)
        );
        let final_path = self.base_path.join(&file_name);
        let temp_path = self.temp_path();

        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.flush().await?;
            drop(file);
            fs::rename(&temp_path, &final_path).await
        }
        .await;

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(file = %file_name, size, "Stored image");

        Ok(StoredImage {
            public_path: format!("{}/{}", self.public_prefix, file_name),
            file_name,
            size,
        })
    }

    async fn remove(&self, public_path: &str) -> Result<bool, StorageError> {
        let path = self.resolve(public_path)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn root(&self) -> &Path {
        &self.base_path
    }

    fn public_prefix(&self) -> &str {
        &self.public_prefix
    }
}
