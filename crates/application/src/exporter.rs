use std::collections::HashSet;
use std::path::{Path, PathBuf};

use boardkit_domain::{EntryFailure, ExportReport, ImageName, ImageQuery, SelectionExpression};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, ArchiveSession, ArchiveWriter, BoardImageStore, ImagePathResolver,
    MetadataResolver,
};

#[derive(Debug, Clone)]
pub struct ExportRequest<'r> {
    pub query: &'r ImageQuery,
    pub selection: &'r str,
    pub save_to_zip: bool,
    pub save_metadata: bool,
    /// A path ending in `.zip` names the archive itself, anything else is
    /// treated as the directory to place `<board>_images.zip` in.
    pub save_location: Option<&'r Path>,
}

/// Selects images from a board and optionally bundles them into an archive.
pub struct BatchExporter<'a> {
    store: &'a dyn BoardImageStore,
    paths: &'a dyn ImagePathResolver,
    metadata: Option<&'a dyn MetadataResolver>,
    archive: Option<&'a dyn ArchiveWriter>,
    export_dir: &'a Path,
}

impl<'a> BatchExporter<'a> {
    pub fn new(
        store: &'a dyn BoardImageStore,
        paths: &'a dyn ImagePathResolver,
        export_dir: &'a Path,
    ) -> Self {
        Self {
            store,
            paths,
            metadata: None,
            archive: None,
            export_dir,
        }
    }

    pub fn with_metadata(mut self, metadata: &'a dyn MetadataResolver) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_archive_writer(mut self, archive: &'a dyn ArchiveWriter) -> Self {
        self.archive = Some(archive);
        self
    }

    pub fn export_selection(
        &self,
        request: &ExportRequest<'_>,
    ) -> Result<ExportReport, ApplicationError> {
        let expression = SelectionExpression::parse(request.selection)?;

        let archive = match (request.save_to_zip, self.archive) {
            (false, _) => None,
            (true, Some(archive)) => Some(archive),
            (true, None) => return Err(ApplicationError::ResourceUnavailable("archive writer")),
        };
        let metadata = match (request.save_to_zip && request.save_metadata, self.metadata) {
            (false, _) => None,
            (true, Some(metadata)) => Some(metadata),
            (true, None) => {
                return Err(ApplicationError::ResourceUnavailable("metadata resolver"))
            }
        };

        let board_id = &request.query.board_id;
        let board = self.store.find_board(board_id)?.ok_or_else(|| {
            ApplicationError::NotFound(format!("board not found for id={board_id}"))
        })?;

        let listing = self.store.list_ordered(request.query)?;
        if listing.is_empty() {
            return Err(ApplicationError::EmptySelection {
                board: board_id.clone(),
            });
        }

        let selected = expression.resolve(&listing)?;
        info!(
            board = %board_id,
            available = listing.len(),
            selected = selected.len(),
            "resolved selection"
        );

        let Some(archive) = archive else {
            return Ok(ExportReport {
                selected,
                ..ExportReport::default()
            });
        };

        let target = archive_target(&board.name, request.save_location, self.export_dir);
        let mut report = ExportReport::default();
        let archive_path =
            archive.write_archive(&target, &mut |session: &mut dyn ArchiveSession| {
                self.fill_archive(session, &selected, metadata, &mut report);
            })?;

        info!(
            archive = %archive_path.display(),
            images = report.archived_images,
            sidecars = report.metadata_sidecars,
            failed = report.failures.len(),
            "archive written"
        );
        report.message = format!("Your images are saved in {}", archive_path.display());
        report.archive_path = Some(archive_path);
        report.selected = selected;
        Ok(report)
    }

    fn fill_archive(
        &self,
        session: &mut dyn ArchiveSession,
        selected: &[ImageName],
        metadata: Option<&dyn MetadataResolver>,
        report: &mut ExportReport,
    ) {
        let mut written = HashSet::new();
        for name in selected {
            if !written.insert(name) {
                debug!(image = %name, "already archived");
                continue;
            }

            let added = self
                .paths
                .resolve_path(name)
                .and_then(|path| session.add_file(name.base_name(), &path));
            if let Err(error) = added {
                warn!(image = %name, %error, "skipping image");
                report.failures.push(EntryFailure::new(name.as_str(), error));
                continue;
            }
            report.archived_images += 1;

            let Some(resolver) = metadata else {
                continue;
            };
            let sidecar_name = format!("{}.json", name.stem());
            match write_sidecar(session, resolver, name, &sidecar_name) {
                Ok(true) => report.metadata_sidecars += 1,
                Ok(false) => debug!(image = %name, "no metadata to export"),
                Err(error) => {
                    warn!(image = %name, %error, "skipping metadata sidecar");
                    report.failures.push(EntryFailure::new(sidecar_name, error));
                }
            }
        }
    }
}

fn write_sidecar(
    session: &mut dyn ArchiveSession,
    resolver: &dyn MetadataResolver,
    name: &ImageName,
    sidecar_name: &str,
) -> Result<bool, ApplicationError> {
    let Some(metadata) = resolver.resolve_metadata(name)? else {
        return Ok(false);
    };
    let contents = serde_json::to_vec_pretty(&metadata)
        .map_err(|error| ApplicationError::Persistence(error.to_string()))?;
    session.add_bytes(sidecar_name, &contents)?;
    Ok(true)
}

fn archive_target(board_name: &str, save_location: Option<&Path>, export_dir: &Path) -> PathBuf {
    let file_name = format!("{}_images.zip", sanitize_file_stem(board_name));
    match save_location {
        None => export_dir.join(file_name),
        Some(location) if has_zip_extension(location) => location.to_path_buf(),
        Some(location) => location.join(file_name),
    }
}

fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

fn sanitize_file_stem(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | ' ' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "board".to_string()
    } else {
        cleaned
    }
}
