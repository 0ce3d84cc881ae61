use crate::error::DeskError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

const WORKBOOK_EXTENSION: &str = "xlsx";

/// Read-only view of the report folders.
///
/// Sections are the immediate subdirectories of `root`, re-scanned on every
/// call. Workbook listings per section are memoized until [`invalidate`] is
/// called.
///
/// [`invalidate`]: SectionCatalog::invalidate
pub struct SectionCatalog {
    root: PathBuf,
    files: Mutex<HashMap<String, Arc<Vec<String>>>>,
}

impl SectionCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Mutex::new(HashMap::new()),
        }
    }

    /// Section names sorted alphabetically.
    pub fn sections(&self) -> Result<Vec<String>, DeskError> {
        let mut sections: Vec<String> = fs::read_dir(&self.root)?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "failed to read section entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        sections.sort();
        Ok(sections)
    }

    /// Resolve a section name to its directory, rejecting anything that is
    /// not one of the listed sections.
    pub fn section_path(&self, section: &str) -> Result<PathBuf, DeskError> {
        if self.sections()?.iter().any(|s| s == section) {
            Ok(self.root.join(section))
        } else {
            Err(DeskError::SectionNotFound(section.to_string()))
        }
    }

    /// Workbook file names in a section, memoized.
    pub fn files(&self, section: &str) -> Result<Arc<Vec<String>>, DeskError> {
        if let Some(cached) = self.lock_files().get(section) {
            return Ok(cached.clone());
        }

        let dir = self.section_path(section)?;
        let listed = Arc::new(scan_workbooks(&dir)?);
        debug!(section, count = listed.len(), "workbook listing cached");
        self.lock_files()
            .insert(section.to_string(), listed.clone());
        Ok(listed)
    }

    /// Resolve a workbook within a section to its path on disk. A listed file
    /// that has since disappeared is reported as not found.
    pub fn file_path(&self, section: &str, file: &str) -> Result<PathBuf, DeskError> {
        let files = self.files(section)?;
        let path = self.root.join(section).join(file);
        if files.iter().any(|f| f == file) && path.is_file() {
            Ok(path)
        } else {
            Err(DeskError::FileNotFound(file.to_string()))
        }
    }

    /// Drop every memoized workbook listing.
    pub fn invalidate(&self) {
        let mut files = self.lock_files();
        let dropped = files.len();
        files.clear();
        info!(dropped, "workbook listings invalidated");
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Vec<String>>>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn scan_workbooks(dir: &Path) -> Result<Vec<String>, DeskError> {
    let mut files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read workbook entry");
                None
            }
        })
        .filter(|path| path.is_file() && is_workbook(path))
        .filter_map(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION))
        == Some(true)
}
