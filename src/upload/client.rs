use crate::config::AppConfig;
use crate::error::ConvertError;
use crate::upload::types::{ConvertPayload, ConvertRequest, FileSource};
use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Something that turns a document into CSV.
///
/// The HTTP client is the only production implementation; sessions take it as
/// a trait object so they can run against a stub.
pub trait ConvertBackend: Send + Sync {
    fn convert(&self, request: ConvertRequest) -> BoxFuture<'_, Result<ConvertPayload, ConvertError>>;
}

#[derive(Clone)]
pub struct HttpConvertClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpConvertClient {
    pub fn new(config: &AppConfig) -> Result<Self, ConvertError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ConvertError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(
            client,
            &config.base_url,
            config.request_timeout_secs,
        ))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
        }
    }

    pub fn into_backend(self) -> Arc<dyn ConvertBackend> {
        Arc::new(self)
    }

    pub fn endpoint_url(&self, request: &ConvertRequest) -> String {
        format!("{}{}", self.base_url, request.mode.endpoint_path())
    }

    async fn send(&self, request: ConvertRequest) -> Result<ConvertPayload, ConvertError> {
        let url = self.endpoint_url(&request);
        let file_name = request.file.name.clone();
        let form = build_form(&request).await?;

        info!(
            "Uploading '{}' to {} ({} column hints)",
            file_name,
            url,
            request.columns.len()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ConvertError::from_reqwest(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Conversion of '{}' rejected with status: {}",
                file_name, status
            );
            return Err(ConvertError::Rejected {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| ConvertError::from_reqwest(e, self.timeout_secs))?;

        debug!(
            "Conversion of '{}' returned {} bytes ({:?})",
            file_name,
            body.len(),
            content_type
        );
        Ok(ConvertPayload::classify(body, content_type.as_deref()))
    }
}

impl ConvertBackend for HttpConvertClient {
    fn convert(&self, request: ConvertRequest) -> BoxFuture<'_, Result<ConvertPayload, ConvertError>> {
        self.send(request).boxed()
    }
}

/// Assemble the multipart body: the document under `file`, plus `columns`
/// as a JSON array when the mode takes hints and there are any.
async fn build_form(request: &ConvertRequest) -> Result<Form, ConvertError> {
    let bytes: Vec<u8> = match &request.file.source {
        FileSource::Path(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|e| ConvertError::ReadFile {
                    path: path.clone(),
                    reason: e.to_string(),
                })?
        }
        FileSource::Bytes(bytes) => bytes.to_vec(),
    };

    let part = Part::bytes(bytes)
        .file_name(request.file.name.clone())
        .mime_str(request.file.mime_type())
        .map_err(|e| ConvertError::InvalidRequest(e.to_string()))?;

    let mut form = Form::new().part("file", part);

    if request.mode.supports_columns() && !request.columns.is_empty() {
        let columns = serde_json::to_string(&request.columns)
            .map_err(|e| ConvertError::InvalidRequest(e.to_string()))?;
        form = form.text("columns", columns);
    }

    Ok(form)
}
