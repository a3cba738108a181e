use async_trait::async_trait;
use bgstrip::{multipart::UploadedFile, remote::BackgroundRemover, Error, Result};
use std::sync::{Arc, Mutex};

/// Mock background remover for driving the HTTP surface without a network.
pub struct MockRemover {
    pub response: Vec<u8>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<UploadedFile>>>,
}

impl MockRemover {
    pub fn new(response: Vec<u8>) -> Self {
        Self {
            response,
            error: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            response: Vec::new(),
            error: Some(message.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn received(&self) -> Vec<UploadedFile> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackgroundRemover for MockRemover {
    async fn remove_background(&self, file: &UploadedFile) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(file.clone());

        if let Some(ref message) = self.error {
            return Err(Error::remote_acquisition(message.clone()));
        }

        Ok(self.response.clone())
    }
}

/// Build a multipart body with a single named file part.
pub fn multipart_body(boundary: &str, name: &str, filename: Option<&str>, payload: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    match filename {
        Some(f) => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n").as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
