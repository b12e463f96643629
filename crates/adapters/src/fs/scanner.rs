use std::path::{Path, PathBuf};

use boardkit_application::{ApplicationError, EntryPayload, SourceBatch};
use boardkit_domain::has_supported_extension;
use walkdir::WalkDir;

/// Lists the image files directly inside a folder, filtered by extension.
#[derive(Debug, Clone)]
pub struct WalkdirFileScanner {
    extensions: Vec<String>,
}

impl WalkdirFileScanner {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    pub fn scan(&self, folder: &Path) -> Result<DirectoryBatch, ApplicationError> {
        if !folder.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {}",
                folder.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if !has_supported_extension(entry.path(), &self.extensions) {
                continue;
            }
            files.push(entry.file_name().to_string_lossy().to_string());
        }

        Ok(DirectoryBatch {
            root: folder.to_path_buf(),
            files,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryBatch {
    root: PathBuf,
    files: Vec<String>,
}

impl SourceBatch for DirectoryBatch {
    fn entry_names(&self) -> Vec<String> {
        self.files.clone()
    }

    fn open_entry(&mut self, name: &str) -> Result<EntryPayload, ApplicationError> {
        if !self.files.iter().any(|file| file == name) {
            return Err(ApplicationError::NotFound(format!(
                "{name} is not part of {}",
                self.root.display()
            )));
        }
        Ok(EntryPayload::File(self.root.join(name)))
    }
}
