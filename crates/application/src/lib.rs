mod error;
mod exporter;
mod importer;
mod ports;
mod service;
mod use_cases;

#[cfg(test)]
mod testing;

pub use error::ApplicationError;
pub use exporter::{BatchExporter, ExportRequest};
pub use importer::BatchImporter;
pub use ports::{
    ArchiveSession, ArchiveWriter, BoardImageStore, Clock, EntryPayload, ImageDecoder,
    ImagePathResolver, ImportSource, ImportTarget, MetadataResolver, NewImage, SourceBatch,
    SourceOpener,
};
pub use service::{ApplicationPorts, ApplicationService};
pub use use_cases::{
    BootstrapStoreCommand, CreateBoardCommand, ImportImagesCommand, ListBoardImagesCommand,
    ListBoardsCommand, RetrieveBoardImagesCommand, SetStarredCommand,
};
