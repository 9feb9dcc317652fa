use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Server responded with {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("No response from server: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        // A status-carrying reqwest error still means a response arrived.
        match e.status() {
            Some(status) => ApiError::Status {
                status,
                detail: None,
            },
            None => ApiError::Transport(e),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("Camera command failed: {0}")]
    Camera(String),

    #[error("Could not read image: {0}")]
    Io(#[from] std::io::Error),
}
