mod error;
mod image;
mod query;
mod report;
mod selection;

pub use error::DomainError;
pub use image::{
    has_supported_extension, Board, BoardId, BoardImage, DecodedImage, ImageCategory, ImageName,
};
pub use query::ImageQuery;
pub use report::{EntryFailure, ExportReport, ImportOutcome, ImportReport};
pub use selection::{select, Segment, SelectionExpression};
