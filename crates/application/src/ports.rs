use std::path::{Path, PathBuf};

use boardkit_domain::{
    Board, BoardId, BoardImage, DecodedImage, ImageCategory, ImageName, ImageQuery,
};

use crate::ApplicationError;

/// Where a freshly decoded image is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub board_id: BoardId,
    pub category: ImageCategory,
}

#[derive(Debug, Clone)]
pub struct NewImage<'a> {
    pub image: &'a DecodedImage,
    pub target: &'a ImportTarget,
    pub created_at: String,
    pub metadata_json: Option<String>,
}

pub trait BoardImageStore {
    fn initialize(&self) -> Result<(), ApplicationError>;

    fn create_board(&self, board: &Board) -> Result<(), ApplicationError>;

    fn find_board(&self, board_id: &BoardId) -> Result<Option<Board>, ApplicationError>;

    fn list_boards(&self) -> Result<Vec<Board>, ApplicationError>;

    /// Persists one image and returns the name it is stored under.
    fn append(&self, image: &NewImage<'_>) -> Result<ImageName, ApplicationError>;

    /// Matching images, oldest first.
    fn list_records(&self, query: &ImageQuery) -> Result<Vec<BoardImage>, ApplicationError>;

    fn list_ordered(&self, query: &ImageQuery) -> Result<Vec<ImageName>, ApplicationError> {
        Ok(self
            .list_records(query)?
            .into_iter()
            .map(|record| record.name)
            .collect())
    }

    fn set_starred(&self, name: &ImageName, starred: bool) -> Result<(), ApplicationError>;
}

pub trait ImagePathResolver {
    fn resolve_path(&self, name: &ImageName) -> Result<PathBuf, ApplicationError>;
}

pub trait MetadataResolver {
    fn resolve_metadata(
        &self,
        name: &ImageName,
    ) -> Result<Option<serde_json::Value>, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl ImportSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPayload {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// An opened import source. Entries are read one at a time so a bad entry
/// only affects itself.
pub trait SourceBatch {
    fn entry_names(&self) -> Vec<String>;

    fn open_entry(&mut self, name: &str) -> Result<EntryPayload, ApplicationError>;
}

pub trait SourceOpener {
    fn open(&self, source: &ImportSource) -> Result<Box<dyn SourceBatch>, ApplicationError>;
}

pub trait ImageDecoder {
    fn decode(&self, payload: &EntryPayload) -> Result<DecodedImage, ApplicationError>;
}

pub trait ArchiveSession {
    fn add_file(&mut self, entry_name: &str, source: &Path) -> Result<(), ApplicationError>;

    fn add_bytes(&mut self, entry_name: &str, contents: &[u8]) -> Result<(), ApplicationError>;
}

pub trait ArchiveWriter {
    /// Creates the archive at `target`, lets `fill` add entries, and
    /// finalizes the archive before returning, whatever `fill` did.
    /// Returns the absolute path of the written archive.
    fn write_archive(
        &self,
        target: &Path,
        fill: &mut dyn FnMut(&mut dyn ArchiveSession),
    ) -> Result<PathBuf, ApplicationError>;
}

pub trait Clock {
    fn now_timestamp_string(&self) -> String;
}
