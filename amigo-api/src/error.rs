/// Failures surfaced by the HTTP client wrapper. Non-2xx responses keep the
/// status in a dedicated variant so callers can tell a rejected request from
/// a broken connection.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
