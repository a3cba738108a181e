mod client;
mod scrape;
mod types;

pub use client::{BackgroundRemover, RemoteClient};
pub use types::{RemoteSession, UploadResponse};
