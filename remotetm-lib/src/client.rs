//! Main RemoteTmClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;
use crate::session::SESSION_HEADER;
use crate::session::SessionProvider;
use crate::upload::TmxUploader;
use crate::upload::UploadFile;
use crate::upload::UploadResponse;

/// Name of the multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Client for the RemoteTM REST API.
///
/// Cheap to clone (uses `Arc` internally).
///
/// # Example
///
/// ```ignore
/// use remotetm_lib::{RemoteTmClient, StaticSession};
///
/// let client = RemoteTmClient::builder()
///     .url("https://tm.example.com/remotetm")
///     .session_provider(StaticSession::new(token))
///     .build()?;
///
/// let response = client.upload(&file).await?;
/// ```
#[derive(Clone)]
pub struct RemoteTmClient {
    inner: Arc<RemoteTmClientInner>,
}

struct RemoteTmClientInner {
    main_url: String,
    session_provider: Arc<dyn SessionProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl RemoteTmClient {
    /// Starts a builder; URL and session provider are required.
    pub fn builder() -> RemoteTmClientBuilder<Missing, Missing> {
        RemoteTmClientBuilder::new()
    }

    /// Returns the server's main URL.
    pub fn main_url(&self) -> &str {
        &self.inner.main_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.main_url.trim_end_matches('/'), path)
    }

    async fn post(&self, path: &str) -> Result<RequestBuilder, Error> {
        let session = self.inner.session_provider.session().await?;
        let mut request = self
            .inner
            .http_client
            .post(self.endpoint(path))
            .header(SESSION_HEADER, session.token())
            .header(ACCEPT, "application/json");
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        Ok(request)
    }

    /// Uploads a TMX file as `multipart/form-data` with a single `file` part.
    pub async fn upload(&self, file: &UploadFile) -> Result<UploadResponse, Error> {
        log::debug!("Uploading {} ({} bytes)", file.name, file.len());

        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(mime) = &file.mime_type {
            part = part.mime_str(mime).map_err(ApiError::from)?;
        }
        let form = Form::new().part(FILE_FIELD, part);

        let request = self.post("upload").await?.multipart(form);
        self.send(request).await
    }

    /// Uploads a zipped TMX; the server extracts the archive.
    pub async fn upload_zip(&self, file: &UploadFile) -> Result<UploadResponse, Error> {
        log::debug!("Uploading archive {} ({} bytes)", file.name, file.len());

        let request = self
            .post("upload")
            .await?
            .header(CONTENT_TYPE, "application/zip")
            .body(file.bytes.clone());
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<UploadResponse, Error> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        match serde_json::from_str::<UploadResponse>(&body) {
            Ok(parsed) => {
                log::debug!("Upload answered {}: {}", status.as_u16(), parsed.status);
                Ok(parsed)
            }
            Err(_) if !status.is_success() => Err(ApiError::http(status.as_u16(), body).into()),
            Err(e) => Err(ApiError::unparsable(e, body).into()),
        }
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(error),
        }
    }
}

#[async_trait]
impl TmxUploader for RemoteTmClient {
    async fn upload_tmx(&self, file: &UploadFile) -> Result<UploadResponse, Error> {
        self.upload(file).await
    }

    async fn upload_tmx_archive(&self, file: &UploadFile) -> Result<UploadResponse, Error> {
        self.upload_zip(file).await
    }
}

impl std::fmt::Debug for RemoteTmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteTmClient")
            .field("main_url", &self.inner.main_url)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// A required builder field that has not been given yet.
pub struct Missing;

/// A required builder field that has been given.
pub struct Set<T>(T);

/// Builder for constructing a [`RemoteTmClient`].
///
/// # Required Fields
///
/// - `url` - The server's main URL
/// - `session_provider` - A [`SessionProvider`] implementation
pub struct RemoteTmClientBuilder<U, P> {
    url: U,
    session_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl RemoteTmClientBuilder<Missing, Missing> {
    pub fn new() -> Self {
        Self {
            url: Missing,
            session_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for RemoteTmClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> RemoteTmClientBuilder<Missing, P> {
    /// Sets the server's main URL, e.g. `https://tm.example.com/remotetm`.
    pub fn url(self, url: impl Into<String>) -> RemoteTmClientBuilder<Set<String>, P> {
        RemoteTmClientBuilder {
            url: Set(url.into()),
            session_provider: self.session_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> RemoteTmClientBuilder<U, Missing> {
    /// Sets the source of the session token.
    pub fn session_provider<T: SessionProvider + 'static>(
        self,
        provider: T,
    ) -> RemoteTmClientBuilder<U, Set<Arc<dyn SessionProvider>>> {
        RemoteTmClientBuilder {
            url: self.url,
            session_provider: Set(Arc::new(provider) as Arc<dyn SessionProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> RemoteTmClientBuilder<U, P> {
    /// Upper bound for a whole upload, response body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Connect timeout for the HTTP client built by [`Self::build`]. Ignored
    /// when a client is supplied through [`Self::http_client`].
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use an existing HTTP client, e.g. one sharing a connection pool.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl RemoteTmClientBuilder<Set<String>, Set<Arc<dyn SessionProvider>>> {
    /// Builds the [`RemoteTmClient`], validating the URL.
    pub fn build(self) -> Result<RemoteTmClient, ApiError> {
        let url = Url::parse(&self.url.0)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.url.0)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "{}: unsupported scheme",
                self.url.0
            )));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(RemoteTmClient {
            inner: Arc::new(RemoteTmClientInner {
                main_url: self.url.0,
                session_provider: self.session_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
