use std::sync::atomic::{AtomicBool, Ordering};

use boardkit_domain::{EntryFailure, ImageName, ImportOutcome, ImportReport};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, BoardImageStore, Clock, ImageDecoder, ImportSource, ImportTarget, NewImage,
    SourceBatch, SourceOpener,
};

/// Imports every entry of a source into a board, one entry at a time.
///
/// Entries are processed sorted by name. A failure to open, decode or commit
/// one entry is recorded in the report and the batch moves on; only setup
/// failures (unknown board, unreadable source) abort the call.
pub struct BatchImporter<'a> {
    opener: &'a dyn SourceOpener,
    decoder: &'a dyn ImageDecoder,
    store: &'a dyn BoardImageStore,
    clock: &'a dyn Clock,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> BatchImporter<'a> {
    pub fn new(
        opener: &'a dyn SourceOpener,
        decoder: &'a dyn ImageDecoder,
        store: &'a dyn BoardImageStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            opener,
            decoder,
            store,
            clock,
            cancel: None,
        }
    }

    /// Checked before each entry; once raised the batch stops early.
    pub fn with_cancel_flag(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn import_batch(
        &self,
        source: &ImportSource,
        target: &ImportTarget,
    ) -> Result<ImportReport, ApplicationError> {
        if self.store.find_board(&target.board_id)?.is_none() {
            return Err(ApplicationError::NotFound(format!(
                "board not found for id={}",
                target.board_id
            )));
        }

        let mut batch = self.opener.open(source)?;
        let mut names = batch.entry_names();
        names.sort();

        let mut report = ImportReport::with_total(names.len());
        info!(
            source = %source.path().display(),
            board = %target.board_id,
            entries = names.len(),
            "importing batch"
        );

        for (position, name) in names.iter().enumerate() {
            if self
                .cancel
                .is_some_and(|cancel| cancel.load(Ordering::SeqCst))
            {
                warn!(processed = position, "import cancelled");
                report.cancelled = true;
                break;
            }

            debug!(entry = %name, position = position + 1, total = names.len(), "processing entry");
            let outcome = match self.import_entry(batch.as_mut(), name, target) {
                Ok(image_name) => ImportOutcome::Imported(image_name),
                Err(error) => {
                    warn!(entry = %name, %error, "skipping entry");
                    ImportOutcome::Failed(EntryFailure::new(name.as_str(), error))
                }
            };
            report.record(outcome);
        }

        info!(
            imported = report.imported.len(),
            failed = report.failures.len(),
            "import finished"
        );
        Ok(report)
    }

    fn import_entry(
        &self,
        batch: &mut dyn SourceBatch,
        name: &str,
        target: &ImportTarget,
    ) -> Result<ImageName, ApplicationError> {
        let payload = batch.open_entry(name)?;
        let image = self.decoder.decode(&payload)?;
        let metadata_json = json!({
            "source_entry": name,
            "source_format": image.source_format,
            "width": image.width,
            "height": image.height,
        })
        .to_string();

        self.store.append(&NewImage {
            image: &image,
            target,
            created_at: self.clock.now_timestamp_string(),
            metadata_json: Some(metadata_json),
        })
    }
}
