//! File storage abstraction for uploaded course images.
//!
//! The storage backend is a trait so the course service does not care whether
//! images end up on the local disk or somewhere else. Stored files are
//! addressed by their public path (e.g. `/uploads/1718000000000-3f2a9c1e.png`),
//! which is exactly what a course record keeps.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::file_storage::{FileStorage, LocalFileStorage, UploadedFile};
//!
//! let storage = LocalFileStorage::new("uploads", "/uploads", 5 * 1024 * 1024);
//! storage.ensure_dir().await?;
//!
//! let path = storage.save(&upload).await?;   // "/uploads/1718000000000-3f2a9c1e.png"
//! storage.delete(&path).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

/// Future returned by [`FileStorage`] operations.
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// A file received from a client, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Store the file under a freshly generated name and return its public path.
    fn save<'a>(&'a self, file: &'a UploadedFile) -> StorageFuture<'a, String>;

    /// Delete a file by its public path. A file that is already gone is not an error.
    fn delete<'a>(&'a self, public_path: &'a str) -> StorageFuture<'a, ()>;
}

/// Error type for file storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// Only images are accepted.
    InvalidMimeType { received: String },

    /// I/O error (file system or similar).
    IoError(std::io::Error),

    /// Path does not point inside the storage.
    InvalidKey(String),
}

impl StorageError {
    /// Whether the failure was caused by the uploaded content rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileSize { .. } | Self::InvalidMimeType { .. }
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} MB", max_bytes / (1024 * 1024))
            }
            Self::InvalidMimeType { received } => {
                write!(f, "Only image files are allowed (received '{}')", received)
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Local filesystem-based storage, served over HTTP under `public_prefix`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
    public_prefix: String,
    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
        max_file_size: usize,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Create the storage directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }

    /// Reject non-images and oversized files before touching the disk.
    pub fn validate(&self, file: &UploadedFile) -> Result<(), StorageError> {
        if !file.content_type.starts_with("image/") {
            return Err(StorageError::InvalidMimeType {
                received: file.content_type.clone(),
            });
        }

        if file.bytes.len() > self.max_file_size {
            return Err(StorageError::InvalidFileSize {
                max_bytes: self.max_file_size,
            });
        }

        Ok(())
    }

    /// `<unix-millis>-<random><.ext>`, keeping the original extension only.
    fn generate_file_name(original: &str) -> String {
        let extension = Path::new(original)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        let random = Uuid::new_v4().simple().to_string();

        format!(
            "{}-{}{}",
            Utc::now().timestamp_millis(),
            &random[..12],
            extension
        )
    }

    fn public_path(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }

    /// Map a public path back to a file name inside `base_dir`.
    fn key_from_public_path<'p>(&self, public_path: &'p str) -> Result<&'p str, StorageError> {
        let key = public_path
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                StorageError::InvalidKey(format!(
                    "'{}' is not under {}",
                    public_path, self.public_prefix
                ))
            })?;

        Self::validate_key(key)?;
        Ok(key)
    }

    /// Validate storage key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.contains('/') {
            return Err(StorageError::InvalidKey(
                "Key must be a plain file name".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, file: &'a UploadedFile) -> StorageFuture<'a, String> {
        Box::pin(async move {
            self.validate(file)?;

            let key = Self::generate_file_name(&file.file_name);
            fs::create_dir_all(&self.base_dir).await?;
            fs::write(self.base_dir.join(&key), &file.bytes).await?;

            tracing::debug!(key = %key, size = file.bytes.len(), "Stored uploaded file");
            Ok(self.public_path(&key))
        })
    }

    fn delete<'a>(&'a self, public_path: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let key = self.key_from_public_path(public_path)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_MB: usize = 5 * 1024 * 1024;

    fn temp_storage() -> LocalFileStorage {
        let dir = std::env::temp_dir().join(format!("learnhub-storage-{}", Uuid::new_v4()));
        LocalFileStorage::new(dir, "/uploads", FIVE_MB)
    }

    fn png(bytes: Vec<u8>) -> UploadedFile {
        UploadedFile {
            file_name: "cover.PNG".to_string(),
            content_type: "image/png".to_string(),
            bytes,
        }
    }

    #[test]
    fn test_validate_key_accepts_valid_keys() {
        assert!(LocalFileStorage::validate_key("1718000000000-abc123.png").is_ok());
        assert!(LocalFileStorage::validate_key("1718000000000-abc123").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_path_traversal() {
        assert!(LocalFileStorage::validate_key("../../../etc/passwd").is_err());
        assert!(LocalFileStorage::validate_key("nested/file.png").is_err());
        assert!(LocalFileStorage::validate_key("..\\windows\\system32").is_err());
    }

    #[test]
    fn test_generated_name_keeps_extension() {
        let name = LocalFileStorage::generate_file_name("holiday photo.JPeG");
        assert!(name.ends_with(".jpeg"));
        assert!(LocalFileStorage::validate_key(&name).is_ok());

        let bare = LocalFileStorage::generate_file_name("no-extension");
        assert!(!bare.contains('.'));
    }

    #[test]
    fn test_validate_rejects_non_images() {
        let storage = temp_storage();
        let file = UploadedFile {
            file_name: "notes.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![1, 2, 3],
        };

        let err = storage.validate(&file).unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_validate_rejects_oversized_files() {
        let storage = temp_storage();
        let err = storage.validate(&png(vec![0; FIVE_MB + 1])).unwrap_err();
        assert!(matches!(err, StorageError::InvalidFileSize { .. }));
        assert_eq!(err.to_string(), "File exceeds maximum size of 5 MB");
    }

    #[tokio::test]
    async fn test_save_then_delete() {
        let storage = temp_storage();
        let path = storage.save(&png(vec![137, 80, 78, 71])).await.unwrap();

        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".png"));

        let key = path.trim_start_matches("/uploads/");
        let on_disk = storage.base_dir().join(key);
        assert!(on_disk.exists());

        storage.delete(&path).await.unwrap();
        assert!(!on_disk.exists());

        // Second delete is a no-op.
        storage.delete(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_paths() {
        let storage = temp_storage();
        assert!(storage.delete("/etc/passwd").await.is_err());
        assert!(storage.delete("/uploads/../secret").await.is_err());
    }
}
