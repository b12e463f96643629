use std::path::PathBuf;

use boardkit_domain::{Board, BoardImage, ExportReport, ImportReport};

use crate::{
    ApplicationError, ArchiveWriter, BatchExporter, BatchImporter, BoardImageStore,
    BootstrapStoreCommand, Clock, CreateBoardCommand, ExportRequest, ImageDecoder,
    ImagePathResolver, ImportImagesCommand, ImportTarget, ListBoardImagesCommand,
    ListBoardsCommand, MetadataResolver, RetrieveBoardImagesCommand, SetStarredCommand,
    SourceOpener,
};

/// Collaborators the service is built from.
pub struct ApplicationPorts {
    pub store: Box<dyn BoardImageStore>,
    pub paths: Box<dyn ImagePathResolver>,
    pub metadata: Option<Box<dyn MetadataResolver>>,
    pub opener: Box<dyn SourceOpener>,
    pub decoder: Box<dyn ImageDecoder>,
    pub archive: Option<Box<dyn ArchiveWriter>>,
    pub clock: Box<dyn Clock>,
}

pub struct ApplicationService {
    ports: ApplicationPorts,
    export_dir: PathBuf,
}

impl ApplicationService {
    pub fn new(ports: ApplicationPorts, export_dir: PathBuf) -> Self {
        Self { ports, export_dir }
    }

    pub fn bootstrap_store(&self, _command: BootstrapStoreCommand) -> Result<(), ApplicationError> {
        self.ports.store.initialize()
    }

    pub fn create_board(&self, command: CreateBoardCommand) -> Result<Board, ApplicationError> {
        let name = command.board_name.trim();
        let board = Board {
            name: if name.is_empty() {
                command.board_id.to_string()
            } else {
                name.to_string()
            },
            id: command.board_id,
        };
        self.ports.store.create_board(&board)?;
        Ok(board)
    }

    pub fn list_boards(&self, _command: ListBoardsCommand) -> Result<Vec<Board>, ApplicationError> {
        self.ports.store.list_boards()
    }

    pub fn import_images(
        &self,
        command: ImportImagesCommand,
    ) -> Result<ImportReport, ApplicationError> {
        if command.source.path().as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "source path must not be empty".to_string(),
            ));
        }

        let target = ImportTarget {
            board_id: command.board_id,
            category: command.category,
        };
        let importer = BatchImporter::new(
            self.ports.opener.as_ref(),
            self.ports.decoder.as_ref(),
            self.ports.store.as_ref(),
            self.ports.clock.as_ref(),
        );
        match command.cancel.as_deref() {
            Some(cancel) => importer
                .with_cancel_flag(cancel)
                .import_batch(&command.source, &target),
            None => importer.import_batch(&command.source, &target),
        }
    }

    pub fn list_board_images(
        &self,
        command: ListBoardImagesCommand,
    ) -> Result<Vec<BoardImage>, ApplicationError> {
        let board_id = &command.query.board_id;
        if self.ports.store.find_board(board_id)?.is_none() {
            return Err(ApplicationError::NotFound(format!(
                "board not found for id={board_id}"
            )));
        }
        self.ports.store.list_records(&command.query)
    }

    pub fn set_starred(&self, command: SetStarredCommand) -> Result<(), ApplicationError> {
        self.ports.store.set_starred(&command.image, command.starred)
    }

    pub fn retrieve_board_images(
        &self,
        command: RetrieveBoardImagesCommand,
    ) -> Result<ExportReport, ApplicationError> {
        let mut exporter = BatchExporter::new(
            self.ports.store.as_ref(),
            self.ports.paths.as_ref(),
            &self.export_dir,
        );
        if let Some(metadata) = self.ports.metadata.as_deref() {
            exporter = exporter.with_metadata(metadata);
        }
        if let Some(archive) = self.ports.archive.as_deref() {
            exporter = exporter.with_archive_writer(archive);
        }

        exporter.export_selection(&ExportRequest {
            query: &command.query,
            selection: &command.selection,
            save_to_zip: command.save_to_zip,
            save_metadata: command.save_metadata,
            save_location: command.save_location.as_deref(),
        })
    }
}
