use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("image name must not be empty")]
    InvalidImageName,
    #[error("board id must not be empty")]
    InvalidBoardId,
    #[error("unknown image category {0:?}, expected \"images\" or \"assets\"")]
    UnknownCategory(String),
    #[error("invalid range {segment:?}: start {start} is greater than end {end}")]
    InvalidRange {
        segment: String,
        start: usize,
        end: usize,
    },
    #[error("index {index} is out of range, valid indices are 1..={len}")]
    IndexOutOfRange { index: usize, len: usize },
}
