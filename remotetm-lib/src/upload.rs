//! TMX upload model

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// `status` value of a successful call.
pub const STATUS_OK: &str = "OK";
/// `status` value the server uses for failed calls.
pub const STATUS_ERROR: &str = "Error";

/// A file staged for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name reported to the server.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// MIME type of the part, if known.
    pub mime_type: Option<String>,
}

impl UploadFile {
    /// Creates a file from an in-memory buffer.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    /// Reads a file from disk, naming it after the last path component.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes))
    }

    /// Sets the MIME type sent with the multipart part.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the name carries a `.zip` extension.
    pub fn is_zip(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    }
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// JSON status object returned by `/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    /// Server supplied explanation of a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Name the server stored the upload under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl UploadResponse {
    pub fn ok(file: impl Into<String>) -> Self {
        Self {
            status: STATUS_OK.to_string(),
            reason: None,
            file: Some(file.into()),
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            reason: Some(reason.into()),
            file: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Sends a staged TMX file to the server.
#[async_trait]
pub trait TmxUploader: Send + Sync {
    async fn upload_tmx(&self, file: &UploadFile) -> Result<UploadResponse, Error>;

    /// Sends a zipped TMX; the server unpacks it before importing.
    async fn upload_tmx_archive(&self, file: &UploadFile) -> Result<UploadResponse, Error>;
}
