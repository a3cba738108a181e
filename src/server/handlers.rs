use super::types::{DownloadRequest, ErrorResponse};
use crate::{download, multipart, remote::BackgroundRemover, Error, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub remover: Arc<dyn BackgroundRemover>,
}

/// `POST /remove` — multipart body with an `image` field; responds with the
/// processed PNG bytes.
pub async fn remove(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    match remove_inner(&state, &headers, &body).await {
        Ok(png) => {
            info!("Successfully processed image ({} bytes)", png.len());
            ([(header::CONTENT_TYPE, "image/png")], png).into_response()
        }
        Err(e) => {
            error!("Failed to process image: {}", e);
            error_response("Failed to process image", &e)
        }
    }
}

async fn remove_inner(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Vec<u8>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| Error::invalid_input("Missing content type"))?;
    let boundary = multipart::boundary(content_type)
        .ok_or_else(|| Error::invalid_input("Missing multipart boundary"))?;

    let file = multipart::extract(body, boundary)
        .ok_or_else(|| Error::invalid_input("No image file provided"))?;

    info!("Received {} ({} bytes)", file.filename, file.bytes.len());

    state.remover.remove_background(&file).await
}

/// `POST /download` — re-emits a base64 blob as a binary attachment so the
/// browser gets a real file download.
pub async fn download(Json(request): Json<DownloadRequest>) -> Response {
    let blob = request.blob.unwrap_or_default();

    match download::build_attachment(&blob) {
        Ok(attachment) => (
            [
                (header::CONTENT_TYPE, "image/png".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", attachment.filename),
                ),
            ],
            attachment.bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to build download attachment: {}", e);
            error_response("Failed to download image", &e)
        }
    }
}

/// Map an error to its HTTP status and JSON body.
///
/// Client input problems come back verbatim as 400s; everything else is a
/// 500 carrying a generic error plus best-effort upstream detail.
fn error_response(context: &str, err: &Error) -> Response {
    match err {
        Error::InvalidInput(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: msg.clone(),
                message: None,
                details: None,
            }),
        )
            .into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: context.to_string(),
                message: Some(err.to_string()),
                details: err
                    .upstream_status()
                    .map(|status| format!("upstream status {status}")),
            }),
        )
            .into_response(),
    }
}
