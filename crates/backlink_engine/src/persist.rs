use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::export::{export_filename, ExportFormat};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("export directory unusable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Directory that receives one export file per day and format.
///
/// Saving again on the same day replaces that day's file. The content is
/// staged in a sibling temp file and renamed into place.
#[derive(Debug, Clone)]
pub struct ExportDir {
    root: PathBuf,
}

impl ExportDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the directory if it is missing. Fails when the path is taken by
    /// something other than a directory.
    pub fn prepare(&self) -> Result<(), PersistError> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            Err(_) => fs::create_dir_all(&self.root).map_err(|err| {
                PersistError::OutputDir(format!("{}: {err}", self.root.display()))
            }),
        }
    }

    pub fn file_for(&self, format: ExportFormat, date: NaiveDate) -> PathBuf {
        self.root.join(export_filename(format, date))
    }

    pub fn save(
        &self,
        format: ExportFormat,
        date: NaiveDate,
        content: &str,
    ) -> Result<PathBuf, PersistError> {
        self.prepare()?;
        let target = self.file_for(format, date);
        replace_file(&self.root, &target, content)?;
        Ok(target)
    }
}

fn replace_file(dir: &Path, target: &Path, content: &str) -> Result<(), PersistError> {
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file_mut().sync_all()?;
    // Rename replaces an existing target.
    staged
        .persist(target)
        .map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}
