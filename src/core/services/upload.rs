use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{info, warn};

use crate::core::infrastructure::source::RestSource;
use crate::error::{FolioError, LoadError, Result};

const MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Resume or CV document
    Resume,
    /// Profile or project image; `tag` is sent as the `type` field
    Image { tag: &'static str },
}

impl UploadKind {
    fn route(&self) -> &'static str {
        match self {
            UploadKind::Resume => "portfolio/upload/resume",
            UploadKind::Image { .. } => "portfolio/upload/image",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            UploadKind::Resume => "file",
            UploadKind::Image { .. } => "image",
        }
    }

    fn max_size(&self) -> u64 {
        match self {
            UploadKind::Resume => 10 * MEGABYTE,
            UploadKind::Image { .. } => 5 * MEGABYTE,
        }
    }

    fn accepted(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            UploadKind::Resume => &[
                ("pdf", "application/pdf"),
                ("doc", "application/msword"),
                (
                    "docx",
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                ),
            ],
            UploadKind::Image { .. } => &[
                ("jpg", "image/jpeg"),
                ("jpeg", "image/jpeg"),
                ("png", "image/png"),
                ("webp", "image/webp"),
            ],
        }
    }

    /// MIME type for `path`, or a validation error naming the accepted formats.
    pub fn mime_for(&self, path: &Path) -> Result<&'static str> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        self.accepted()
            .iter()
            .find(|(accepted_ext, _)| *accepted_ext == ext)
            .map(|(_, mime)| *mime)
            .ok_or_else(|| {
                let formats: Vec<String> = self.accepted().iter().map(|(e, _)| e.to_uppercase()).collect();
                FolioError::Validation(format!("Invalid file type. Accepted formats: {}", formats.join(", ")))
            })
    }

    pub fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_size() {
            return Err(FolioError::Validation(format!(
                "File too large. Maximum size is {}MB.",
                self.max_size() / MEGABYTE
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Single multipart POST per call; retrying is up to the caller.
pub struct Uploader {
    backend: RestSource,
}

impl Uploader {
    pub fn new(backend: RestSource) -> Self {
        Self { backend }
    }

    pub async fn upload(&self, path: &Path, kind: UploadKind) -> Result<UploadReceipt> {
        let mime = kind.mime_for(path)?;
        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| FolioError::Validation(format!("Cannot read {}: {}", path.display(), e)))?
            .len();
        kind.check_size(size)?;

        let endpoint = self.backend.endpoint(kind.route());
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| FolioError::request(&endpoint, e))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime)
            .map_err(|e| FolioError::request(&endpoint, e))?;
        let mut form = Form::new().part(kind.field(), part);
        if let UploadKind::Image { tag } = kind {
            form = form.text("type", tag);
        }

        info!("Uploading {} ({} bytes) to {}", file_name, size, endpoint);
        let response = self
            .backend
            .client()
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| FolioError::request(&endpoint, e))?;

        // Failed uploads still answer with a `{success: false, error}` body.
        let status = response.status();
        let body = response.bytes().await.map_err(|e| FolioError::request(&endpoint, e))?;
        let receipt: UploadReceipt = serde_json::from_slice(&body).map_err(|e| {
            if status.is_success() {
                FolioError::request(&endpoint, e)
            } else {
                FolioError::request(&endpoint, LoadError::Status(status.as_u16()))
            }
        })?;

        if !receipt.success {
            warn!(
                "Upload of {} rejected: {}",
                file_name,
                receipt.error.as_deref().unwrap_or("Upload failed")
            );
        }
        Ok(receipt)
    }
}
