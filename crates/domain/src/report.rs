use std::path::PathBuf;

use serde::Serialize;

use crate::ImageName;

/// One source entry or selected image that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub entry: String,
    pub reason: String,
}

impl EntryFailure {
    pub fn new(entry: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            entry: entry.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImageName),
    Failed(EntryFailure),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total_entries: usize,
    pub imported: Vec<ImageName>,
    pub failures: Vec<EntryFailure>,
    pub cancelled: bool,
}

impl ImportReport {
    pub fn with_total(total_entries: usize) -> Self {
        Self {
            total_entries,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Imported(name) => self.imported.push(name),
            ImportOutcome::Failed(failure) => self.failures.push(failure),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub selected: Vec<ImageName>,
    pub archive_path: Option<PathBuf>,
    pub archived_images: usize,
    pub metadata_sidecars: usize,
    pub failures: Vec<EntryFailure>,
    pub message: String,
}
