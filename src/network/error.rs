use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure channel of every adapted call.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error (status {code}): {body}")]
    Http { code: u16, body: String },

    #[error("network error: {0}")]
    Network(#[source] BoxError),

    #[error("unknown API error: {0}")]
    Unknown(#[source] BoxError),
}

impl ApiError {
    pub fn unknown(message: impl Into<String>) -> Self {
        ApiError::Unknown(message.into().into())
    }

    pub fn http_code(&self) -> Option<u16> {
        match self {
            ApiError::Http { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Raw outcome errors of a delegate [`Call`](super::Call).
#[derive(Error, Debug)]
pub enum CallError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("call was canceled")]
    Canceled,

    #[error("call already executed")]
    AlreadyExecuted,
}

/// Wiring-time errors, raised while an API client is being built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be a parameterized type")]
    NotParameterized(&'static str),

    #[error("no call adapter accepts endpoint `{endpoint}` returning {shape}")]
    NoAdapter { endpoint: &'static str, shape: String },

    #[error("invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
