use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, ClientBuilder, Response};
use serde::Serialize;

use super::{ApiError, Backend, UploadPart};
use crate::config::Config;
use crate::data::model::{ClassificationResult, ClassifiedRecord};

/// Only connection setup is bounded; a running classification may take as
/// long as the backend needs.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The blocking client defaults to a 30 s total timeout; lift it.
fn client_builder() -> ClientBuilder {
    Client::builder()
        .user_agent(concat!("atc-smart-pro/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(None)
}

#[derive(Serialize)]
struct ExportRequest<'a> {
    records: &'a [ClassifiedRecord],
}

/// [`Backend`] talking to the classification service over HTTP.
pub struct HttpBackend {
    config: Config,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = client_builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Config, client: Client) -> Self {
        Self { config, client }
    }
}

impl Backend for HttpBackend {
    fn classify(&self, parts: Vec<UploadPart>) -> Result<ClassificationResult, ApiError> {
        let url = self.config.process_url();
        let mut form = Form::new();
        for part in parts {
            let file = Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(part.mime)
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            form = form.part("files", file);
        }

        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let body = success_body(response)?;
        let result: ClassificationResult =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        result.validate().map_err(ApiError::Invalid)?;
        Ok(result)
    }

    fn export(&self, records: &[ClassifiedRecord]) -> Result<Vec<u8>, ApiError> {
        let url = self.config.export_url();
        log::debug!("POST {url} ({} records)", records.len());
        let response = self
            .client
            .post(&url)
            .json(&ExportRequest { records })
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        success_body(response)
    }
}

fn success_body(response: Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let bytes = response
        .bytes()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(bytes.to_vec())
}
