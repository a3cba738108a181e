use super::{scrape, types::UploadResponse, RemoteSession};
use crate::{
    config::RemoteConfig,
    error::RemotePhase,
    multipart::UploadedFile,
    Error, Result,
};
use async_trait::async_trait;
use reqwest::{header, multipart};
use std::time::Duration;
use tracing::{debug, info};

#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    async fn remove_background(&self, file: &UploadedFile) -> Result<Vec<u8>>;
}

/// Client for the remote background-removal service.
///
/// Each invocation runs a strictly sequential pipeline: acquire a session
/// by scraping the service's HTML page, upload the image bytes, then
/// request processing. Every step depends on the previous one and the first
/// failure aborts the rest; nothing is retried or cached.
pub struct RemoteClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the HTML page and scrape a fresh token/task pair out of it.
    async fn acquire_session(&self) -> Result<RemoteSession> {
        debug!("Fetching session page: {}", self.config.page_url);

        let response = self
            .http
            .get(&self.config.page_url)
            .timeout(Duration::from_secs(self.config.session_timeout_secs))
            .send()
            .await?;
        let html = response.text().await?;

        scrape::scrape_session(&html)
            .ok_or_else(|| Error::remote_acquisition("Failed to get token or task ID"))
    }

    /// Upload the image bytes under the scraped task id.
    ///
    /// The metadata fields replay the exchange the remote web client
    /// performs: a single-chunk upload with the service's protocol flags.
    /// The part is always content-typed `image/jpeg`, matching the
    /// observed exchange regardless of the actual input format.
    async fn upload(&self, session: &RemoteSession, file: &UploadedFile) -> Result<String> {
        debug!("Uploading to: {}", self.config.upload_url);

        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str("image/jpeg")?;
        let form = multipart::Form::new()
            .text("name", file.filename.clone())
            .text("chunk", "0")
            .text("chunks", "1")
            .text("task", session.task_id.clone())
            .text("preview", "1")
            .text("pdfinfo", "0")
            .text("pdfforms", "0")
            .text("pdfresetforms", "0")
            .text("v", "web.0")
            .part("file", part);

        let response = self
            .http
            .post(&self.config.upload_url)
            .bearer_auth(&session.token)
            .header(header::ORIGIN, &self.config.origin)
            .header(header::REFERER, format!("{}/", self.config.origin))
            .multipart(form)
            .timeout(Duration::from_secs(self.config.upload_timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::remote_call(
                RemotePhase::Upload,
                Some(status.as_u16()),
                body,
            ));
        }

        let upload: UploadResponse = response.json().await.map_err(|e| {
            Error::remote_call(
                RemotePhase::Upload,
                None,
                format!("response missing server_filename: {e}"),
            )
        })?;

        Ok(upload.server_filename)
    }

    /// Ask the service to strip the background from an uploaded asset.
    ///
    /// The `server_filename` must come from an upload made with the same
    /// session; the service rejects mixed pairs.
    async fn process(&self, session: &RemoteSession, server_filename: &str) -> Result<Vec<u8>> {
        debug!("Processing via: {}", self.config.process_url);

        let params = [
            ("task", session.task_id.as_str()),
            ("server_filename", server_filename),
        ];

        let response = self
            .http
            .post(&self.config.process_url)
            .bearer_auth(&session.token)
            .header(header::ORIGIN, &self.config.origin)
            .header(header::REFERER, format!("{}/", self.config.origin))
            .form(&params)
            .timeout(Duration::from_secs(self.config.process_timeout_secs))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::remote_call(
                RemotePhase::Process,
                Some(status.as_u16()),
                body,
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl BackgroundRemover for RemoteClient {
    async fn remove_background(&self, file: &UploadedFile) -> Result<Vec<u8>> {
        info!("Acquiring remote session");
        let session = self.acquire_session().await?;

        info!("Uploading {} ({} bytes)", file.filename, file.bytes.len());
        let server_filename = self.upload(&session, file).await?;

        info!("Requesting background removal");
        let result = self.process(&session, &server_filename).await?;

        info!("Background removal complete ({} bytes)", result.len());
        Ok(result)
    }
}
