use std::path::{Path, PathBuf};

use axum::body::Bytes;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Public path prefix stored on records; served from the upload directory
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Ceiling applied when no explicit limit is configured
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Hanya file gambar yang diizinkan!")]
    UnsupportedMedia { content_type: String },

    #[error("Ukuran file maksimal 5MB")]
    PayloadTooLarge { size: usize },

    #[error("Gagal menyimpan file: {0}")]
    Io(#[from] std::io::Error),
}

/// A single file part received with a create/update request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Writes accepted images to a directory under collision-resistant names
#[derive(Debug, Clone)]
pub struct UploadSink {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadSink {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Content-type and size rules, checked before anything is written
    pub fn check(&self, upload: &ImageUpload) -> Result<(), UploadError> {
        if !upload.content_type.starts_with("image/") {
            return Err(UploadError::UnsupportedMedia {
                content_type: upload.content_type.clone(),
            });
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(UploadError::PayloadTooLarge {
                size: upload.bytes.len(),
            });
        }
        Ok(())
    }

    /// Persist the image and return its public path. Returns once the file
    /// has been flushed to disk.
    pub async fn store(&self, upload: &ImageUpload) -> Result<String, UploadError> {
        self.check(upload)?;
        self.ensure_dir().await?;

        let file_name = Self::stored_name(&upload.file_name);
        let path = self.dir.join(&file_name);

        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(&upload.bytes).await?;
        file.sync_all().await?;

        tracing::debug!("Stored upload {} ({} bytes)", path.display(), upload.bytes.len());
        Ok(format!("{}/{}", PUBLIC_PREFIX, file_name))
    }

    /// `<millis>-<uuid>-<sanitized original name>`
    fn stored_name(original: &str) -> String {
        let base = Path::new(original)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        let sanitized: String = base
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        let sanitized = if sanitized.trim_matches('.').is_empty() {
            "image".to_string()
        } else {
            sanitized
        };

        format!(
            "{}-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            sanitized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(len: usize) -> ImageUpload {
        ImageUpload {
            file_name: "civic.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    fn temp_sink(max_bytes: usize) -> UploadSink {
        UploadSink::new(std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4())), max_bytes)
    }

    #[test]
    fn rejects_non_image_content_type() {
        let sink = temp_sink(DEFAULT_MAX_BYTES);
        let mut upload = png(10);
        upload.content_type = "application/pdf".to_string();
        assert!(matches!(sink.check(&upload), Err(UploadError::UnsupportedMedia { .. })));
    }

    #[test]
    fn rejects_oversized_payload() {
        let sink = temp_sink(16);
        assert!(matches!(sink.check(&png(17)), Err(UploadError::PayloadTooLarge { size: 17 })));
        assert!(sink.check(&png(16)).is_ok());
    }

    #[test]
    fn stored_names_are_unique_and_sanitized() {
        let a = UploadSink::stored_name("../../etc/pass wd.png");
        let b = UploadSink::stored_name("../../etc/pass wd.png");
        assert_ne!(a, b);
        assert!(a.ends_with("-pass_wd.png"));
        assert!(!a.contains('/'));
        assert!(UploadSink::stored_name("..").ends_with("-image"));
    }

    #[tokio::test]
    async fn store_writes_file_and_returns_public_path() {
        let sink = temp_sink(DEFAULT_MAX_BYTES);
        let path = sink.store(&png(32)).await.unwrap();
        assert!(path.starts_with("/uploads/"));

        let file_name = path.trim_start_matches("/uploads/");
        let written = tokio::fs::read(sink.dir().join(file_name)).await.unwrap();
        assert_eq!(written.len(), 32);

        let _ = tokio::fs::remove_dir_all(sink.dir()).await;
    }
}
