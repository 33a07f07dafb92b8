//! Image selection and validation before a diagnosis request.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest image the backend accepts.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("file must be an image, got content type '{0}'")]
    NotAnImage(String),

    #[error("image is empty")]
    Empty,

    #[error("image is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unsupported image extension for {0}")]
    UnsupportedExtension(PathBuf),

    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An image chosen by the user, ready to be posted as the `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read an image from disk, inferring its content type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(content_type_for_extension)
            .ok_or_else(|| ImageError::UnsupportedExtension(path.to_path_buf()))?;

        let bytes = tokio::fs::read(path).await.map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::new(file_name, content_type, bytes))
    }

    /// Check the upload against what the diagnosis endpoint will take.
    pub fn validate(&self) -> Result<(), ImageError> {
        if !self.content_type.starts_with("image/") {
            return Err(ImageError::NotAnImage(self.content_type.clone()));
        }
        if self.bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: self.bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }
        Ok(())
    }
}

pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
