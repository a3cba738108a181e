use serde::Deserialize;

/// Credentials scraped from the remote service's HTML page.
///
/// Acquired fresh for every request; the token and task id are only valid
/// as a pair, and only for the upload/process exchange they were scraped
/// for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    pub token: String,
    pub task_id: String,
}

/// Body of a successful upload call.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    /// Server-assigned name referencing the uploaded asset in the
    /// processing call.
    pub server_filename: String,
}
