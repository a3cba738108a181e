use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Upstream endpoints and per-phase timeouts.
///
/// The defaults point at the live service; tests override the URLs to hit a
/// local mock server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_page_url")]
    pub page_url: String,
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
    #[serde(default = "default_process_url")]
    pub process_url: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_session_timeout")]
    pub session_timeout_secs: u64,
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,
    #[serde(default = "default_process_timeout")]
    pub process_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            upload_url: default_upload_url(),
            process_url: default_process_url(),
            origin: default_origin(),
            session_timeout_secs: default_session_timeout(),
            upload_timeout_secs: default_upload_timeout(),
            process_timeout_secs: default_process_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_page_url() -> String {
    "https://www.iloveimg.com/remove-background".to_string()
}

fn default_upload_url() -> String {
    "https://api5g.iloveimg.com/v1/upload".to_string()
}

fn default_process_url() -> String {
    "https://api5g.iloveimg.com/v1/removebackground".to_string()
}

fn default_origin() -> String {
    "https://www.iloveimg.com".to_string()
}

fn default_session_timeout() -> u64 {
    15
}

fn default_upload_timeout() -> u64 {
    30
}

fn default_process_timeout() -> u64 {
    60
}
