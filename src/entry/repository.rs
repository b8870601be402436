//! Creating, locating and loading entries by date.

use super::document::EntryDocument;
use crate::errors::{AppError, AppResult};
use crate::store::DateKeyedStore;
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A journal entry on disk: its date, its file and, once read, its document.
///
/// The document is read at most once per `Entry` and then kept in memory.
#[derive(Debug, Clone)]
pub struct Entry {
    date: NaiveDate,
    path: PathBuf,
    /// `None` until the file has been read.
    document: Option<EntryDocument>,
}

impl Entry {
    fn unloaded(date: NaiveDate, path: PathBuf) -> Self {
        Entry {
            date,
            path,
            document: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Returns the entry's document, reading and parsing the file on first use.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and `AppError::Parse`
    /// if its content is malformed.
    pub fn document(&mut self) -> AppResult<&EntryDocument> {
        if !self.is_loaded() {
            let raw = fs::read_to_string(&self.path)?;
            let document = EntryDocument::from_yaml_str(&raw).map_err(|e| match e {
                AppError::Parse(msg) => {
                    AppError::Parse(format!("{}: {}", self.path.display(), msg))
                }
                other => other,
            })?;
            debug!("Loaded entry {:?}", self.path);
            self.document = Some(document);
        }

        self.document
            .as_ref()
            .ok_or_else(|| AppError::Parse(format!("{}: not loaded", self.path.display())))
    }

    /// Consumes the entry, returning its document.
    pub fn into_document(mut self) -> AppResult<EntryDocument> {
        self.document()?;
        self.document
            .ok_or_else(|| AppError::Parse(format!("{}: not loaded", self.path.display())))
    }
}

/// Looks entries up by date and creates new ones.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    store: DateKeyedStore,
}

impl EntryRepository {
    pub fn new(store: DateKeyedStore) -> Self {
        EntryRepository { store }
    }

    pub fn store(&self) -> &DateKeyedStore {
        &self.store
    }

    /// Returns the entry for `date` if its file exists, with its document loaded.
    ///
    /// # Errors
    ///
    /// A malformed existing file is an `AppError::Parse`, never "absent".
    pub fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<Entry>> {
        let path = self.store.path_for(date)?;
        if !path.is_file() {
            debug!("No entry for {}", date);
            return Ok(None);
        }

        let mut entry = Entry::unloaded(date, path);
        entry.document()?;
        Ok(Some(entry))
    }

    /// Returns the document of the entry for `date`, if there is one.
    pub fn load_by_date(&self, date: NaiveDate) -> AppResult<Option<EntryDocument>> {
        self.find_by_date(date)?
            .map(Entry::into_document)
            .transpose()
    }

    /// Creates the entry for `date`, seeding its pending list from `previous`.
    ///
    /// Callers check with [`find_by_date`](Self::find_by_date) first. Should a file
    /// show up in between, it is left untouched and returned as is.
    pub fn create(&self, date: NaiveDate, previous: Option<&mut Entry>) -> AppResult<Entry> {
        let document = match previous {
            Some(previous) => {
                debug!("Seeding {} from entry of {}", date, previous.date());
                EntryDocument::from_previous(date, previous.document()?)
            }
            None => EntryDocument::empty(date),
        };

        self.store.ensure_container(date)?;
        let path = self.store.path_for(date)?;

        match write_new_entry_file(&path, &document.to_yaml_string()?) {
            Ok(()) => {
                info!("Created entry {:?}", path);
                Ok(Entry {
                    date,
                    path,
                    document: Some(document),
                })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!("Entry {:?} already exists, keeping its content", path);
                self.find_by_date(date)?.ok_or_else(|| {
                    AppError::Io(std::io::Error::new(
                        ErrorKind::NotFound,
                        format!("Entry {} vanished while being created", path.display()),
                    ))
                })
            }
            Err(e) => Err(AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write entry {}: {}", path.display(), e),
            ))),
        }
    }
}

/// Writes `content` to a file that must not exist yet.
fn write_new_entry_file(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file: File = OpenOptions::new().write(true).create_new(true).open(path)?;

    #[cfg(unix)]
    {
        let mut permissions = file.metadata()?.permissions();
        permissions.set_mode(crate::constants::DEFAULT_FILE_PERMISSIONS);
        file.set_permissions(permissions)?;
    }

    file.write_all(content.as_bytes())?;
    file.sync_all()
}
