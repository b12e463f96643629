//! In-memory fakes for the application ports, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use boardkit_domain::{Board, BoardId, BoardImage, DecodedImage, ImageCategory, ImageName, ImageQuery};

use crate::{
    ApplicationError, ArchiveSession, ArchiveWriter, BoardImageStore, Clock, EntryPayload,
    ImageDecoder, ImagePathResolver, ImportSource, MetadataResolver, NewImage, SourceBatch,
    SourceOpener,
};

#[derive(Default)]
pub struct FakeStore {
    boards: RefCell<Vec<Board>>,
    images: RefCell<Vec<BoardImage>>,
    next_id: Cell<u32>,
    failing_sources: RefCell<Vec<String>>,
    appended_sources: RefCell<Vec<String>>,
    list_calls: Cell<usize>,
}

impl FakeStore {
    pub fn with_board(board_id: &str, board_name: &str) -> Self {
        let store = Self::default();
        store.boards.borrow_mut().push(Board {
            id: BoardId::new(board_id).expect("board id"),
            name: board_name.to_string(),
        });
        store
    }

    pub fn insert_image(&self, board_id: &str, name: &str, metadata_json: Option<&str>) {
        self.images.borrow_mut().push(BoardImage {
            name: ImageName::new(name).expect("image name"),
            board_id: BoardId::new(board_id).expect("board id"),
            category: ImageCategory::Images,
            starred: false,
            created_at: "0".to_string(),
            metadata_json: metadata_json.map(str::to_string),
        });
    }

    pub fn fail_append_for(&self, source: &str) {
        self.failing_sources.borrow_mut().push(source.to_string());
    }

    pub fn appended_sources(&self) -> Vec<String> {
        self.appended_sources.borrow().clone()
    }

    pub fn metadata_of(&self, name: &ImageName) -> Option<String> {
        self.images
            .borrow()
            .iter()
            .find(|image| &image.name == name)
            .and_then(|image| image.metadata_json.clone())
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.get()
    }
}

impl BoardImageStore for FakeStore {
    fn initialize(&self) -> Result<(), ApplicationError> {
        Ok(())
    }

    fn create_board(&self, board: &Board) -> Result<(), ApplicationError> {
        let mut boards = self.boards.borrow_mut();
        if !boards.iter().any(|existing| existing.id == board.id) {
            boards.push(board.clone());
        }
        Ok(())
    }

    fn find_board(&self, board_id: &BoardId) -> Result<Option<Board>, ApplicationError> {
        Ok(self
            .boards
            .borrow()
            .iter()
            .find(|board| &board.id == board_id)
            .cloned())
    }

    fn list_boards(&self) -> Result<Vec<Board>, ApplicationError> {
        Ok(self.boards.borrow().clone())
    }

    fn append(&self, image: &NewImage<'_>) -> Result<ImageName, ApplicationError> {
        let source = String::from_utf8_lossy(&image.image.rgba).to_string();
        if self.failing_sources.borrow().contains(&source) {
            return Err(ApplicationError::Persistence(format!(
                "store rejected {source}"
            )));
        }

        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let name = ImageName::new(format!("{id:04}.png"))?;
        self.images.borrow_mut().push(BoardImage {
            name: name.clone(),
            board_id: image.target.board_id.clone(),
            category: image.target.category,
            starred: false,
            created_at: image.created_at.clone(),
            metadata_json: image.metadata_json.clone(),
        });
        self.appended_sources.borrow_mut().push(source);
        Ok(name)
    }

    fn list_records(&self, query: &ImageQuery) -> Result<Vec<BoardImage>, ApplicationError> {
        self.list_calls.set(self.list_calls.get() + 1);
        Ok(self
            .images
            .borrow()
            .iter()
            .filter(|image| query.matches(image))
            .cloned()
            .collect())
    }

    fn set_starred(&self, name: &ImageName, starred: bool) -> Result<(), ApplicationError> {
        let mut images = self.images.borrow_mut();
        let image = images
            .iter_mut()
            .find(|image| &image.name == name)
            .ok_or_else(|| ApplicationError::NotFound(format!("image not found: {name}")))?;
        image.starred = starred;
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeOpener {
    entries: Vec<(String, Vec<u8>)>,
    unreadable: Vec<String>,
    open_calls: Cell<usize>,
}

impl FakeOpener {
    pub fn new(entries: &[(&str, &[u8])]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, bytes)| (name.to_string(), bytes.to_vec()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_unreadable(mut self, name: &str) -> Self {
        self.unreadable.push(name.to_string());
        self
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.get()
    }
}

impl SourceOpener for FakeOpener {
    fn open(&self, _source: &ImportSource) -> Result<Box<dyn SourceBatch>, ApplicationError> {
        self.open_calls.set(self.open_calls.get() + 1);
        Ok(Box::new(FakeBatch {
            entries: self.entries.iter().cloned().collect(),
            unreadable: self.unreadable.clone(),
        }))
    }
}

struct FakeBatch {
    entries: HashMap<String, Vec<u8>>,
    unreadable: Vec<String>,
}

impl SourceBatch for FakeBatch {
    fn entry_names(&self) -> Vec<String> {
        self.entries
            .keys()
            .cloned()
            .chain(self.unreadable.iter().cloned())
            .collect()
    }

    fn open_entry(&mut self, name: &str) -> Result<EntryPayload, ApplicationError> {
        self.entries
            .get(name)
            .map(|bytes| EntryPayload::Bytes(bytes.clone()))
            .ok_or_else(|| ApplicationError::Io(format!("cannot read entry {name}")))
    }
}

/// Accepts payloads starting with `image:`; everything else is corrupt.
pub struct FakeDecoder;

impl ImageDecoder for FakeDecoder {
    fn decode(&self, payload: &EntryPayload) -> Result<DecodedImage, ApplicationError> {
        match payload {
            EntryPayload::Bytes(bytes) if bytes.starts_with(b"image:") => Ok(DecodedImage {
                width: 2,
                height: 1,
                source_format: "fake".to_string(),
                rgba: bytes.clone(),
            }),
            EntryPayload::Bytes(_) => Err(ApplicationError::Decode(
                "unrecognized image data".to_string(),
            )),
            EntryPayload::File(path) => Err(ApplicationError::Decode(format!(
                "fake decoder cannot open {}",
                path.display()
            ))),
        }
    }
}

pub struct FakeClock;

impl Clock for FakeClock {
    fn now_timestamp_string(&self) -> String {
        "123".to_string()
    }
}

#[derive(Default)]
pub struct FakePaths {
    missing: Vec<String>,
}

impl FakePaths {
    pub fn missing(names: &[&str]) -> Self {
        Self {
            missing: names.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl ImagePathResolver for FakePaths {
    fn resolve_path(&self, name: &ImageName) -> Result<PathBuf, ApplicationError> {
        if self.missing.iter().any(|missing| missing == name.as_str()) {
            return Err(ApplicationError::NotFound(format!(
                "no file stored for {name}"
            )));
        }
        Ok(Path::new("/library").join(name.as_str()))
    }
}

#[derive(Default)]
pub struct FakeMetadata {
    values: HashMap<String, serde_json::Value>,
}

impl FakeMetadata {
    pub fn with(values: &[(&str, &str)]) -> Self {
        Self {
            values: values
                .iter()
                .map(|(name, json)| {
                    (
                        name.to_string(),
                        serde_json::from_str(json).expect("metadata json"),
                    )
                })
                .collect(),
        }
    }
}

impl MetadataResolver for FakeMetadata {
    fn resolve_metadata(
        &self,
        name: &ImageName,
    ) -> Result<Option<serde_json::Value>, ApplicationError> {
        Ok(self.values.get(name.as_str()).cloned())
    }
}

#[derive(Default)]
pub struct FakeArchiveWriter {
    targets: RefCell<Vec<PathBuf>>,
    entries: RefCell<Vec<(String, Vec<u8>)>>,
    finalized: Cell<usize>,
}

impl FakeArchiveWriter {
    pub fn targets(&self) -> Vec<PathBuf> {
        self.targets.borrow().clone()
    }

    pub fn entries(&self) -> Vec<(String, Vec<u8>)> {
        self.entries.borrow().clone()
    }

    pub fn entry_names(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn entry_bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.entries
            .borrow()
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, bytes)| bytes.clone())
    }

    pub fn finalized_count(&self) -> usize {
        self.finalized.get()
    }
}

impl ArchiveWriter for FakeArchiveWriter {
    fn write_archive(
        &self,
        target: &Path,
        fill: &mut dyn FnMut(&mut dyn ArchiveSession),
    ) -> Result<PathBuf, ApplicationError> {
        self.targets.borrow_mut().push(target.to_path_buf());
        let mut session = FakeSession::default();
        fill(&mut session);
        self.entries.borrow_mut().extend(session.entries);
        self.finalized.set(self.finalized.get() + 1);
        Ok(target.to_path_buf())
    }
}

#[derive(Default)]
struct FakeSession {
    entries: Vec<(String, Vec<u8>)>,
}

impl FakeSession {
    fn push(&mut self, entry_name: &str, contents: Vec<u8>) -> Result<(), ApplicationError> {
        if self.entries.iter().any(|(name, _)| name == entry_name) {
            return Err(ApplicationError::Archive(format!(
                "duplicate entry {entry_name}"
            )));
        }
        self.entries.push((entry_name.to_string(), contents));
        Ok(())
    }
}

impl ArchiveSession for FakeSession {
    fn add_file(&mut self, entry_name: &str, source: &Path) -> Result<(), ApplicationError> {
        self.push(entry_name, source.to_string_lossy().as_bytes().to_vec())
    }

    fn add_bytes(&mut self, entry_name: &str, contents: &[u8]) -> Result<(), ApplicationError> {
        self.push(entry_name, contents.to_vec())
    }
}
