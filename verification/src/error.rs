use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("config error: {0}")]
    Config(String),

    #[error("backend error: {0}")]
    Backend(#[from] legit_backend::BackendError),
}
