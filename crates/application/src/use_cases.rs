use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use boardkit_domain::{BoardId, ImageCategory, ImageName, ImageQuery};

use crate::ImportSource;

#[derive(Debug, Clone, Default)]
pub struct BootstrapStoreCommand;

#[derive(Debug, Clone)]
pub struct CreateBoardCommand {
    pub board_id: BoardId,
    pub board_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListBoardsCommand;

#[derive(Debug, Clone)]
pub struct ImportImagesCommand {
    pub source: ImportSource,
    pub board_id: BoardId,
    pub category: ImageCategory,
    pub cancel: Option<Arc<AtomicBool>>,
}

#[derive(Debug, Clone)]
pub struct ListBoardImagesCommand {
    pub query: ImageQuery,
}

#[derive(Debug, Clone)]
pub struct SetStarredCommand {
    pub image: ImageName,
    pub starred: bool,
}

#[derive(Debug, Clone)]
pub struct RetrieveBoardImagesCommand {
    pub query: ImageQuery,
    pub selection: String,
    pub save_to_zip: bool,
    pub save_metadata: bool,
    pub save_location: Option<PathBuf>,
}
