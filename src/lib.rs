pub mod config;
pub mod download;
pub mod error;
pub mod multipart;
pub mod remote;
pub mod server;

pub use error::{Error, Result};
