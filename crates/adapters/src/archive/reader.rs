use std::fs::File;
use std::io::Read;
use std::path::Path;

use boardkit_application::{ApplicationError, EntryPayload, SourceBatch};
use zip::ZipArchive;

/// Every file entry of a ZIP archive, read into memory one at a time.
pub struct ZipBatch {
    archive: ZipArchive<File>,
    names: Vec<String>,
}

impl ZipBatch {
    pub fn open(path: &Path) -> Result<Self, ApplicationError> {
        let file = File::open(path).map_err(|error| {
            ApplicationError::Io(format!("failed to open archive {}: {error}", path.display()))
        })?;
        let archive = ZipArchive::new(file).map_err(|error| {
            ApplicationError::Archive(format!("failed to read archive {}: {error}", path.display()))
        })?;
        let names = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect();

        Ok(Self { archive, names })
    }
}

impl SourceBatch for ZipBatch {
    fn entry_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn open_entry(&mut self, name: &str) -> Result<EntryPayload, ApplicationError> {
        let mut entry = self
            .archive
            .by_name(name)
            .map_err(|error| ApplicationError::Archive(error.to_string()))?;
        // The declared size comes from the archive itself; let the buffer grow.
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;
        Ok(EntryPayload::Bytes(bytes))
    }
}
