//! Image upload seam
//!
//! The upload service is an external collaborator: it takes a file and
//! returns where the file can be fetched from. Only the returned `url` is
//! ever written into a layout.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub url: String,
    pub ufs_url: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("Upload failed")]
    NoUrl,

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Something went wrong during upload: {0}")]
    Io(String),
}

/// The url of a finished upload. A result without one counts as failed.
pub fn uploaded_url(upload: Result<UploadResult, UploadError>) -> Result<String, UploadError> {
    let result = upload?;
    if result.url.is_empty() {
        return Err(UploadError::NoUrl);
    }
    Ok(result.url)
}

/// Anything that can store a file and hand back its URL
pub trait Uploader {
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<UploadResult, UploadError>;

    /// Read a file from disk and upload it
    fn upload_path(&self, path: &Path) -> Result<UploadResult, UploadError> {
        let bytes = std::fs::read(path).map_err(|e| UploadError::Io(e.to_string()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.upload(&name, &bytes)
    }
}

/// Embeds files inline as base64 `data:` URIs. Useful offline and for
/// self-contained previews.
#[derive(Debug, Clone)]
pub struct DataUriUploader {
    /// Largest accepted file, in bytes
    pub max_bytes: usize,
}

impl Default for DataUriUploader {
    fn default() -> Self {
        Self {
            max_bytes: 4 * 1024 * 1024,
        }
    }
}

impl Uploader for DataUriUploader {
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<UploadResult, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::NoUrl);
        }
        if bytes.len() > self.max_bytes {
            return Err(UploadError::Rejected(format!(
                "{} is {} bytes, limit is {}",
                file_name,
                bytes.len(),
                self.max_bytes
            )));
        }
        let url = format!("data:{};base64,{}", mime_for(file_name), STANDARD.encode(bytes));
        Ok(UploadResult {
            ufs_url: url.clone(),
            url,
        })
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
