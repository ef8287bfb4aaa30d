use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("protocol error: {0}")]
    Protocol(String),
}
