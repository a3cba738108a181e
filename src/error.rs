use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Remote pipeline phase, used to attribute upstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemotePhase {
    Upload,
    Process,
}

impl std::fmt::Display for RemotePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Process => write!(f, "process"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    RemoteAcquisition(String),

    #[error("Remote {phase} call failed: {message}")]
    RemoteCall {
        phase: RemotePhase,
        status: Option<u16>,
        message: String,
    },

    #[error("Decoding error: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn remote_acquisition(msg: impl Into<String>) -> Self {
        Self::RemoteAcquisition(msg.into())
    }

    pub fn remote_call(phase: RemotePhase, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::RemoteCall {
            phase,
            status,
            message: msg.into(),
        }
    }

    /// Upstream HTTP status hint, when the failure carries one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::RemoteCall { status, .. } => *status,
            _ => None,
        }
    }
}
