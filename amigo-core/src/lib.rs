pub mod session;
pub mod validate;

pub use session::{InMemorySessionStore, Session, SessionStore};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("No active session")]
    NoSession,
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
