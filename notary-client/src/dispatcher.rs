//! Request dispatch to the notarization backend
//!
//! Three operations against two endpoints. Whatever request shape was sent,
//! the answer is folded into a [`DispatchOutcome`]:
//! - 2xx → `Ok(body)`
//! - other status → `HttpError { status, body }`
//! - no response → `NetworkError(description)`
//!
//! Bodies are read as JSON; anything unparsable becomes `{}`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use notary_common::config::ClientConfig;
use notary_common::payload::empty_object;
use notary_common::{Address, ContentHash, DispatchOutcome, Error, Result, SelectedFile};

/// Submission endpoint
pub const UPLOAD_PATH: &str = "/api/upload";

/// Verification endpoint (file or hash)
pub const VERIFY_PATH: &str = "/api/verify";

const USER_AGENT: &str = concat!("notary-client/", env!("CARGO_PKG_VERSION"));

/// Content type sent for files whose type could not be sniffed
const FALLBACK_MIME: &str = "application/octet-stream";

/// Network operations used by the interaction flows
///
/// Implementations are stateless between calls.
#[async_trait(?Send)]
pub trait Dispatcher {
    /// Record `file` on behalf of `address`
    async fn submit_file(&self, file: &SelectedFile, address: &Address) -> DispatchOutcome;

    /// Look up a previously recorded file by its contents
    async fn verify_file(&self, file: &SelectedFile) -> DispatchOutcome;

    /// Look up a previously recorded content hash
    async fn verify_hash(&self, hash: &ContentHash) -> DispatchOutcome;
}

/// [`Dispatcher`] backed by `reqwest`
pub struct HttpDispatcher {
    http_client: reqwest::Client,
    config: ClientConfig,
}

impl HttpDispatcher {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send and normalize; the single place transport results are interpreted
    async fn send(&self, request: RequestBuilder) -> DispatchOutcome {
        match request.send().await {
            Ok(response) => normalize(response).await,
            Err(e) => {
                warn!("Request failed without a response: {}", e);
                DispatchOutcome::NetworkError(e.to_string())
            }
        }
    }
}

#[async_trait(?Send)]
impl Dispatcher for HttpDispatcher {
    async fn submit_file(&self, file: &SelectedFile, address: &Address) -> DispatchOutcome {
        let part = match file_part(file).await {
            Ok(part) => part,
            Err(outcome) => return outcome,
        };
        // Backend reads either field name; both carry the same address
        let form = Form::new()
            .part("file", part)
            .text("from", address.to_string())
            .text("address", address.to_string());

        let url = self.config.endpoint(UPLOAD_PATH);
        debug!(url = %url, file = %file.name, size = file.size_bytes, "Submitting file");
        self.send(self.http_client.post(url).multipart(form)).await
    }

    async fn verify_file(&self, file: &SelectedFile) -> DispatchOutcome {
        let part = match file_part(file).await {
            Ok(part) => part,
            Err(outcome) => return outcome,
        };
        let form = Form::new().part("file", part);

        let url = self.config.endpoint(VERIFY_PATH);
        debug!(url = %url, file = %file.name, "Verifying file");
        self.send(self.http_client.post(url).multipart(form)).await
    }

    async fn verify_hash(&self, hash: &ContentHash) -> DispatchOutcome {
        let url = self.config.endpoint(VERIFY_PATH);
        debug!(url = %url, hash = %hash, "Looking up hash");
        // `.json()` also sets `Content-Type: application/json`
        let request = self
            .http_client
            .post(url)
            .json(&json!({ "hash": hash.as_str() }));
        self.send(request).await
    }
}

/// Multipart part carrying the file's bytes
///
/// A file that cannot be read never produces a response, so it is reported
/// the same way as a transport failure.
async fn file_part(file: &SelectedFile) -> std::result::Result<Part, DispatchOutcome> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
        warn!("Failed to read {}: {}", file.path.display(), e);
        DispatchOutcome::NetworkError(format!("Failed to read {}: {}", file.path.display(), e))
    })?;

    let mime = file.mime_type.as_deref().unwrap_or(FALLBACK_MIME);
    Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(mime)
        .map_err(|e| DispatchOutcome::NetworkError(e.to_string()))
}

async fn normalize(response: Response) -> DispatchOutcome {
    let status = response.status();
    let body = read_json_body(response).await;
    info!(status = status.as_u16(), "Backend responded");

    if status.is_success() {
        DispatchOutcome::Ok(body)
    } else {
        DispatchOutcome::HttpError {
            status: status.as_u16(),
            body,
        }
    }
}

async fn read_json_body(response: Response) -> Value {
    match response.bytes().await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            debug!("Response body is not JSON ({}), treating as empty object", e);
            empty_object()
        }),
        Err(e) => {
            debug!("Failed to read response body ({}), treating as empty object", e);
            empty_object()
        }
    }
}
