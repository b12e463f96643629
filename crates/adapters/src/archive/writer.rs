use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use boardkit_application::{ApplicationError, ArchiveSession, ArchiveWriter};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Default)]
pub struct ZipArchiveWriter;

impl ArchiveWriter for ZipArchiveWriter {
    fn write_archive(
        &self,
        target: &Path,
        fill: &mut dyn FnMut(&mut dyn ArchiveSession),
    ) -> Result<PathBuf, ApplicationError> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|error| ApplicationError::Io(error.to_string()))?;
            }
        }

        let file = File::create(target).map_err(|error| {
            ApplicationError::Io(format!(
                "failed to create archive {}: {error}",
                target.display()
            ))
        })?;
        let mut session = ZipSession {
            writer: ZipWriter::new(file),
        };
        fill(&mut session);
        session
            .writer
            .finish()
            .map_err(|error| ApplicationError::Archive(error.to_string()))?;

        target
            .canonicalize()
            .map_err(|error| ApplicationError::Io(error.to_string()))
    }
}

struct ZipSession {
    writer: ZipWriter<File>,
}

impl ZipSession {
    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }
}

impl ArchiveSession for ZipSession {
    fn add_file(&mut self, entry_name: &str, source: &Path) -> Result<(), ApplicationError> {
        let contents = fs::read(source).map_err(|error| {
            ApplicationError::Io(format!("failed to read {}: {error}", source.display()))
        })?;
        self.add_bytes(entry_name, &contents)
    }

    fn add_bytes(&mut self, entry_name: &str, contents: &[u8]) -> Result<(), ApplicationError> {
        self.writer
            .start_file(entry_name, Self::options())
            .map_err(|error| ApplicationError::Archive(error.to_string()))?;
        self.writer
            .write_all(contents)
            .map_err(|error| ApplicationError::Io(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use tempfile::TempDir;
    use zip::ZipArchive;

    #[test]
    fn writes_entries_and_returns_absolute_path() {
        let dir = TempDir::new().expect("tempdir");
        let source = dir.path().join("a.png");
        fs::write(&source, b"pixels").expect("write");
        let target = dir.path().join("out").join("board_images.zip");

        let mut failures = Vec::new();
        let written = ZipArchiveWriter
            .write_archive(&target, &mut |session: &mut dyn ArchiveSession| {
                failures.extend(session.add_file("a.png", &source).err());
                failures.extend(session.add_bytes("a.json", b"{}").err());
                failures.extend(session.add_file("gone.png", &dir.path().join("gone.png")).err());
            })
            .expect("archive");

        assert!(written.is_absolute());
        assert_eq!(failures.len(), 1);

        let mut archive = ZipArchive::new(File::open(&written).expect("open")).expect("zip");
        assert_eq!(archive.len(), 2);
        let mut contents = String::new();
        archive
            .by_name("a.png")
            .expect("entry")
            .read_to_string(&mut contents)
            .expect("read");
        assert_eq!(contents, "pixels");
    }

    #[test]
    fn duplicate_entry_is_rejected_without_breaking_archive() {
        let dir = TempDir::new().expect("tempdir");
        let target = dir.path().join("dup.zip");

        let mut second = None;
        ZipArchiveWriter
            .write_archive(&target, &mut |session: &mut dyn ArchiveSession| {
                session.add_bytes("x.json", b"1").expect("first entry");
                second = Some(session.add_bytes("x.json", b"2"));
            })
            .expect("archive");

        assert!(matches!(second, Some(Err(ApplicationError::Archive(_)))));
        let archive = ZipArchive::new(File::open(&target).expect("open")).expect("zip");
        assert_eq!(archive.len(), 1);
    }
}
