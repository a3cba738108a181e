mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    load_from(&config_path).await
}

async fn load_from(path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", path);

    let config_str = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        // Everything here has a sane default; a missing file is not an error.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No configuration file at {}, using defaults", path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
