mod queries;

use std::fs;
use std::path::PathBuf;

use boardkit_application::{
    ApplicationError, BoardImageStore, ImagePathResolver, MetadataResolver, NewImage,
};
use boardkit_domain::{Board, BoardId, BoardImage, ImageName, ImageQuery};
use image::{ImageFormat, RgbaImage};
use rusqlite::{params, Connection};
use tracing::debug;

use crate::migrations::MIGRATIONS;

/// Board catalog in SQLite, with image files kept as PNG under `library_dir`.
#[derive(Debug, Clone)]
pub struct SqliteBoardStore {
    path: PathBuf,
    library_dir: PathBuf,
}

impl SqliteBoardStore {
    pub fn new(path: impl Into<PathBuf>, library_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            library_dir: library_dir.into(),
        }
    }

    fn open_connection(&self) -> Result<Connection, ApplicationError> {
        let conn = Connection::open(&self.path)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        Ok(conn)
    }

    fn image_path(&self, name: &ImageName) -> PathBuf {
        self.library_dir.join(name.as_str())
    }
}

impl BoardImageStore for SqliteBoardStore {
    fn initialize(&self) -> Result<(), ApplicationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "catalog path must not be empty".to_string(),
            ));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }
        fs::create_dir_all(&self.library_dir)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;

        let conn = self.open_connection()?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        for migration in MIGRATIONS {
            conn.execute_batch(migration)
                .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        }

        Ok(())
    }

    fn create_board(&self, board: &Board) -> Result<(), ApplicationError> {
        let conn = self.open_connection()?;
        queries::insert_board(&conn, board)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn find_board(&self, board_id: &BoardId) -> Result<Option<Board>, ApplicationError> {
        let conn = self.open_connection()?;
        queries::find_board(&conn, board_id.as_str())
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn list_boards(&self) -> Result<Vec<Board>, ApplicationError> {
        let conn = self.open_connection()?;
        queries::list_boards(&conn)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn append(&self, image: &NewImage<'_>) -> Result<ImageName, ApplicationError> {
        let pixels = RgbaImage::from_raw(
            image.image.width,
            image.image.height,
            image.image.rgba.clone(),
        )
        .ok_or_else(|| {
            ApplicationError::Decode(format!(
                "pixel buffer does not match {}x{}",
                image.image.width, image.image.height
            ))
        })?;

        let mut conn = self.open_connection()?;
        let tx = conn
            .transaction()
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        tx.execute(
            "INSERT INTO images (image_name, board_id, category, starred, created_at, metadata_json)
             VALUES (NULL, ?1, ?2, 0, ?3, ?4)",
            params![
                image.target.board_id.as_str(),
                image.target.category.as_str(),
                image.created_at,
                image.metadata_json,
            ],
        )
        .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        let row_id = tx.last_insert_rowid();
        let name = ImageName::new(format!("{row_id:08}.png"))?;
        tx.execute(
            "UPDATE images SET image_name = ?1 WHERE id = ?2",
            params![name.as_str(), row_id],
        )
        .map_err(|error| ApplicationError::Persistence(error.to_string()))?;

        fs::create_dir_all(&self.library_dir)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;
        pixels
            .save_with_format(self.image_path(&name), ImageFormat::Png)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;

        tx.commit()
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        debug!(image = %name, board = %image.target.board_id, "image stored");
        Ok(name)
    }

    fn list_records(&self, query: &ImageQuery) -> Result<Vec<BoardImage>, ApplicationError> {
        let conn = self.open_connection()?;
        queries::list_images(&conn, query)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))
    }

    fn set_starred(&self, name: &ImageName, starred: bool) -> Result<(), ApplicationError> {
        let conn = self.open_connection()?;
        let updated = queries::set_starred(&conn, name.as_str(), starred)
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        if updated == 0 {
            return Err(ApplicationError::NotFound(format!("image not found: {name}")));
        }
        Ok(())
    }
}

impl ImagePathResolver for SqliteBoardStore {
    fn resolve_path(&self, name: &ImageName) -> Result<PathBuf, ApplicationError> {
        let conn = self.open_connection()?;
        let known = queries::image_exists(&conn, name.as_str())
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
        if !known {
            return Err(ApplicationError::NotFound(format!("image not found: {name}")));
        }

        let path = self.image_path(name);
        if !path.is_file() {
            return Err(ApplicationError::NotFound(format!(
                "image file missing: {}",
                path.display()
            )));
        }
        Ok(path)
    }
}

impl MetadataResolver for SqliteBoardStore {
    fn resolve_metadata(
        &self,
        name: &ImageName,
    ) -> Result<Option<serde_json::Value>, ApplicationError> {
        let conn = self.open_connection()?;
        let stored = queries::find_metadata(&conn, name.as_str())
            .map_err(|error| ApplicationError::Persistence(error.to_string()))?
            .ok_or_else(|| ApplicationError::NotFound(format!("image not found: {name}")))?;

        stored
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|error| ApplicationError::Persistence(error.to_string()))
            })
            .transpose()
    }
}
