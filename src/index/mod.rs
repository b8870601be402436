//! Append-only log of entry dates.
//!
//! The recency log answers "which entry came last before this date" without
//! walking the whole journal tree on every run. It lives in the cache directory,
//! one `YYYYMMDD` token per line, in creation order. It is only a cache: when the
//! file is missing it is rebuilt from the tree, and lines it cannot read are
//! skipped with a warning.

use crate::config::Config;
use crate::constants::DATE_FORMAT_COMPACT;
use crate::entry::{Entry, EntryRepository};
use crate::errors::{AppError, AppResult};
use crate::store::{self, DateKeyedStore};
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Recency log bound to a journal tree.
#[derive(Debug, Clone)]
pub struct RecencyIndex {
    log_path: PathBuf,
    store: DateKeyedStore,
}

impl RecencyIndex {
    pub fn new(log_path: impl Into<PathBuf>, store: DateKeyedStore) -> Self {
        RecencyIndex {
            log_path: log_path.into(),
            store,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.recency_log_path(), DateKeyedStore::from_config(config))
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Makes sure the log exists, rebuilding it from the journal tree if it does not.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a rebuild is needed and the journal root is
    /// unset, and `AppError::Io` when the log cannot be written.
    pub fn setup(&self) -> AppResult<()> {
        if self.log_path.is_file() {
            debug!("Recency log present at {:?}", self.log_path);
            return Ok(());
        }

        let count = self.rebuild()?;
        info!("Rebuilt recency log with {} records", count);
        Ok(())
    }

    /// Rewrites the log from every entry file found under the journal root.
    ///
    /// Records are written in directory walk order. Returns the number of records.
    pub fn rebuild(&self) -> AppResult<usize> {
        let root = self.store.root()?;
        let dates = scan_entry_dates(root);

        let mut content = String::with_capacity(dates.len() * 9);
        for date in &dates {
            content.push_str(&format_record(*date));
            content.push('\n');
        }

        self.ensure_log_dir()?;
        fs::write(&self.log_path, content).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to write recency log {}: {}",
                    self.log_path.display(),
                    e
                ),
            ))
        })?;

        Ok(dates.len())
    }

    /// Every readable record, in file order.
    ///
    /// A missing log reads as empty. Unreadable lines are skipped.
    pub fn records(&self) -> AppResult<Vec<NaiveDate>> {
        let raw = match fs::read_to_string(&self.log_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Recency log {:?} does not exist yet", self.log_path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (number, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_record(line) {
                Ok(date) => records.push(date),
                Err(e) => warn!(
                    "Skipping line {} of recency log {:?}: {}",
                    number + 1,
                    self.log_path,
                    e
                ),
            }
        }

        Ok(records)
    }

    /// Latest recorded date strictly before `date`.
    pub fn latest_date_before(&self, date: NaiveDate) -> AppResult<Option<NaiveDate>> {
        Ok(self.records()?.into_iter().filter(|d| *d < date).max())
    }

    /// The entry with the latest recorded date strictly before `date`.
    ///
    /// Records whose file no longer exists are passed over in favour of the next
    /// earlier one.
    pub fn most_recent_before(
        &self,
        repo: &EntryRepository,
        date: NaiveDate,
    ) -> AppResult<Option<Entry>> {
        let mut candidates: Vec<NaiveDate> =
            self.records()?.into_iter().filter(|d| *d < date).collect();
        resolve_latest(repo, &mut candidates)
    }

    /// The entry with the latest recorded date overall.
    pub fn most_recent(&self, repo: &EntryRepository) -> AppResult<Option<Entry>> {
        let mut candidates = self.records()?;
        resolve_latest(repo, &mut candidates)
    }

    /// Appends the date of a freshly created entry.
    ///
    /// No deduplication: recording the same date twice leaves two lines. A hand-edited
    /// log whose last line lacks a terminator gets one first, so records never merge.
    pub fn record_creation(&self, entry: &Entry) -> AppResult<()> {
        self.ensure_log_dir()?;

        let mut log = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.log_path)?;
        let separator = if ends_mid_line(&mut log)? { "\n" } else { "" };
        writeln!(log, "{}{}", separator, format_record(entry.date()))?;

        debug!("Recorded {} in recency log", entry.date());
        Ok(())
    }

    fn ensure_log_dir(&self) -> AppResult<()> {
        match self.log_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => {
                fs::create_dir_all(dir)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

fn resolve_latest(
    repo: &EntryRepository,
    candidates: &mut Vec<NaiveDate>,
) -> AppResult<Option<Entry>> {
    candidates.sort_unstable();
    candidates.dedup();

    for date in candidates.iter().rev() {
        match repo.find_by_date(*date)? {
            Some(entry) => return Ok(Some(entry)),
            None => warn!("Recency log lists {} but its entry is gone", date),
        }
    }

    Ok(None)
}

/// Whether the log is non-empty and its last byte is not a newline.
fn ends_mid_line(log: &mut fs::File) -> std::io::Result<bool> {
    if log.metadata()?.len() == 0 {
        return Ok(false);
    }

    let mut last = [0u8; 1];
    log.seek(SeekFrom::End(-1))?;
    log.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

fn format_record(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_COMPACT).to_string()
}

fn parse_record(line: &str) -> AppResult<NaiveDate> {
    if line.len() != 8 || !line.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Parse(format!(
            "'{}' is not a YYYYMMDD date",
            line
        )));
    }

    NaiveDate::parse_from_str(line, DATE_FORMAT_COMPACT)
        .map_err(|e| AppError::Parse(format!("'{}' is not a valid date: {}", line, e)))
}

/// Dates of every entry file under `root`, in walk order.
fn scan_entry_dates(root: &Path) -> Vec<NaiveDate> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_str()?;
            if !store::filename_matches_format(name) {
                return None;
            }
            match store::date_from_filename(name) {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!("Ignoring {:?}: {}", e.path(), err);
                    None
                }
            }
        })
        .collect()
}
