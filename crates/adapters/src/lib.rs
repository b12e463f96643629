pub mod archive;
pub mod fs;
pub mod migrations;
pub mod presenters;
pub mod sqlite;

pub use archive::{ZipArchiveWriter, ZipBatch};
pub use fs::{SystemClock, WalkdirFileScanner};
pub use presenters::{
    present_board_row, present_export_report, present_image_row, present_import_report,
    present_json,
};
pub use sqlite::SqliteBoardStore;

use std::io::{BufRead, Cursor, Seek};

use boardkit_application::{
    ApplicationError, EntryPayload, ImageDecoder, ImportSource, SourceBatch, SourceOpener,
};
use boardkit_domain::DecodedImage;
use image::io::Reader as ImageReader;

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Opens folders through [`WalkdirFileScanner`] and archives through [`ZipBatch`].
#[derive(Debug, Clone)]
pub struct FsSourceOpener {
    scanner: WalkdirFileScanner,
}

impl FsSourceOpener {
    pub fn new(extensions: Vec<String>) -> Self {
        Self {
            scanner: WalkdirFileScanner::new(extensions),
        }
    }
}

impl Default for FsSourceOpener {
    fn default() -> Self {
        Self::new(
            DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        )
    }
}

impl SourceOpener for FsSourceOpener {
    fn open(&self, source: &ImportSource) -> Result<Box<dyn SourceBatch>, ApplicationError> {
        match source {
            ImportSource::Directory(folder) => Ok(Box::new(self.scanner.scan(folder)?)),
            ImportSource::Archive(path) => Ok(Box::new(ZipBatch::open(path)?)),
        }
    }
}

#[derive(Debug, Default)]
pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, payload: &EntryPayload) -> Result<DecodedImage, ApplicationError> {
        match payload {
            EntryPayload::File(path) => decode_reader(
                ImageReader::open(path).map_err(|error| {
                    ApplicationError::Io(format!("failed to open {}: {error}", path.display()))
                })?,
            ),
            EntryPayload::Bytes(bytes) => decode_reader(ImageReader::new(Cursor::new(bytes))),
        }
    }
}

fn decode_reader<R: BufRead + Seek>(
    reader: ImageReader<R>,
) -> Result<DecodedImage, ApplicationError> {
    let reader = reader
        .with_guessed_format()
        .map_err(|error| ApplicationError::Decode(error.to_string()))?;
    let source_format = reader
        .format()
        .map(|format| format!("{format:?}").to_ascii_lowercase())
        .unwrap_or_else(|| "unknown".to_string());
    let image = reader
        .decode()
        .map_err(|error| ApplicationError::Decode(error.to_string()))?
        .to_rgba8();

    Ok(DecodedImage {
        width: image.width(),
        height: image.height(),
        source_format,
        rgba: image.into_raw(),
    })
}
