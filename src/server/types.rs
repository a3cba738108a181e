use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub blob: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
