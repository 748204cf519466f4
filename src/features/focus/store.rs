//! Session record storage.
//!
//! Persists the single [`SessionRecord`] as YAML at a fixed path.

#[cfg(test)]
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::rc::Rc;

use tracing::debug;

use super::record::SessionRecord;
use crate::error::PomtrackError;

/// Load/save access to the persisted record.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    /// Read the record.
    ///
    /// # Errors
    ///
    /// Returns `PomtrackError::Storage` if it is missing, unreadable, or malformed.
    fn load(&self) -> Result<SessionRecord, PomtrackError>;

    /// Replace the record as a whole.
    ///
    /// # Errors
    ///
    /// Returns `PomtrackError::Storage` if it cannot be written.
    fn save(&self, record: &SessionRecord) -> Result<(), PomtrackError>;
}

/// YAML file store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the record at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a record has been written yet.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<SessionRecord, PomtrackError> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| PomtrackError::storage(&self.path, e))?;

        serde_yaml::from_str(&contents).map_err(|e| PomtrackError::storage(&self.path, e))
    }

    fn save(&self, record: &SessionRecord) -> Result<(), PomtrackError> {
        let contents =
            serde_yaml::to_string(record).map_err(|e| PomtrackError::storage(&self.path, e))?;

        // Write beside the target and rename over it so readers never see a partial file.
        let tmp = self.temp_path();
        fs::write(&tmp, contents).map_err(|e| PomtrackError::storage(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| PomtrackError::storage(&self.path, e))?;

        debug!(path = %self.path.display(), count = record.count, started = ?record.started, "saved session record");
        Ok(())
    }
}

/// In-memory store for tests. Clones share the same record and save counter.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Rc<RefCell<Option<SessionRecord>>>,
    saves: Rc<Cell<usize>>,
}

#[cfg(test)]
impl MemoryStore {
    /// A store already holding `record`.
    #[must_use]
    pub fn with_record(record: SessionRecord) -> Self {
        Self {
            record: Rc::new(RefCell::new(Some(record))),
            saves: Rc::default(),
        }
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.get()
    }

    /// The record as last saved.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionRecord> {
        self.record.borrow().clone()
    }
}

#[cfg(test)]
impl RecordStore for MemoryStore {
    fn load(&self) -> Result<SessionRecord, PomtrackError> {
        self.record
            .borrow()
            .clone()
            .ok_or_else(|| PomtrackError::Storage("no session record".to_string()))
    }

    fn save(&self, record: &SessionRecord) -> Result<(), PomtrackError> {
        *self.record.borrow_mut() = Some(record.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
