use boardkit_domain::{BoardId, DomainError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("no images on board {board} match the requested filters")]
    EmptySelection { board: BoardId },
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(&'static str),
    #[error("io error: {0}")]
    Io(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("archive error: {0}")]
    Archive(String),
}
