//! Day-to-day journal workflow.
//!
//! Ties the entry repository and the recency log together: make sure the entry
//! for a date exists (seeded from the previous one), then hand it to an editor.

use crate::config::Config;
use crate::editor::Editor;
use crate::entry::{Entry, EntryRepository};
use crate::errors::AppResult;
use crate::index::RecencyIndex;
use crate::store::DateKeyedStore;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, info};

/// The journal as the command line sees it.
#[derive(Debug, Clone)]
pub struct Journal {
    repo: EntryRepository,
    index: RecencyIndex,
}

impl Journal {
    pub fn new(repo: EntryRepository, index: RecencyIndex) -> Self {
        Journal { repo, index }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            EntryRepository::new(DateKeyedStore::from_config(config)),
            RecencyIndex::from_config(config),
        )
    }

    pub fn index(&self) -> &RecencyIndex {
        &self.index
    }

    /// Returns the entry for `date`, creating it first if needed.
    ///
    /// A new entry gets the running and pending tasks of the latest entry before
    /// `date` as its pending list, and its date is appended to the recency log.
    /// An existing entry is returned untouched.
    ///
    /// # Errors
    ///
    /// - `AppError::Config` if the journal root is unset, before any filesystem access
    /// - `AppError::Io` on filesystem failures
    /// - `AppError::Parse` if the existing entry for `date` is malformed
    pub fn prepare_entry(&self, date: NaiveDate) -> AppResult<Entry> {
        self.repo.store().root()?;
        self.index.setup()?;
        self.repo.store().ensure_container(date)?;

        if let Some(entry) = self.repo.find_by_date(date)? {
            debug!("Entry for {} already exists", date);
            return Ok(entry);
        }

        let mut previous = self.index.most_recent_before(&self.repo, date)?;
        match &previous {
            Some(previous) => info!("Carrying tasks forward from {}", previous.date()),
            None => debug!("No earlier entry to carry tasks from"),
        }

        let entry = self.repo.create(date, previous.as_mut())?;
        self.index.record_creation(&entry)?;
        Ok(entry)
    }

    /// Prepares the entry for `date` and opens it in `editor`.
    pub fn open_entry(&self, date: NaiveDate, editor: &dyn Editor) -> AppResult<PathBuf> {
        let entry = self.prepare_entry(date)?;
        editor.open(entry.path())?;
        Ok(entry.path().to_path_buf())
    }

    /// Opens the latest existing entry, if there is any. Nothing is created.
    pub fn open_last(&self, editor: &dyn Editor) -> AppResult<Option<PathBuf>> {
        self.repo.store().root()?;
        self.index.setup()?;

        match self.index.most_recent(&self.repo)? {
            Some(entry) => {
                editor.open(entry.path())?;
                Ok(Some(entry.path().to_path_buf()))
            }
            None => {
                info!("The journal has no entries yet");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::cell::RefCell;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct MockEditor {
        opened: RefCell<Vec<PathBuf>>,
    }

    impl Editor for MockEditor {
        fn open(&self, path: &Path) -> AppResult<()> {
            self.opened.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn journal() -> (Journal, TempDir) {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let config = Config {
            root_dir: Some(temp_dir.path().join("journal")),
            cache_dir: temp_dir.path().join("cache"),
            editor_override: None,
        };
        (Journal::from_config(&config), temp_dir)
    }

    #[test]
    fn test_first_entry_is_empty_and_recorded() {
        let (journal, _temp_dir) = journal();
        let d = date(2024, 1, 15);

        let mut entry = journal.prepare_entry(d).unwrap();

        assert_eq!(entry.document().unwrap().tasks_pending, vec![""]);
        assert_eq!(journal.index().records().unwrap(), vec![d]);
    }

    #[test]
    fn test_next_day_carries_unfinished_work() {
        let (journal, _temp_dir) = journal();
        let monday = date(2024, 1, 15);
        let entry = journal.prepare_entry(monday).unwrap();
        fs::write(
            entry.path(),
            "fecha: 15/01/2024\n\
             tareas-en-marcha:\n- a\n\
             tareas-pendientes:\n- b\n\
             tareas-realizadas:\n- done thing\n\
             preguntas:\n- ''\n",
        )
        .unwrap();

        let mut tuesday = journal.prepare_entry(date(2024, 1, 16)).unwrap();

        let document = tuesday.document().unwrap();
        assert_eq!(document.tasks_pending, vec!["a", "b"]);
        assert_eq!(document.tasks_done, vec![""]);
    }

    #[test]
    fn test_existing_entry_is_not_modified_or_recorded_again() {
        let (journal, _temp_dir) = journal();
        let d = date(2024, 1, 15);
        let entry = journal.prepare_entry(d).unwrap();
        fs::write(entry.path(), "fecha: 15/01/2024\npreguntas:\n- edited\n").unwrap();

        let again = journal.prepare_entry(d).unwrap();

        assert_eq!(
            fs::read_to_string(again.path()).unwrap(),
            "fecha: 15/01/2024\npreguntas:\n- edited\n"
        );
        assert_eq!(journal.index().records().unwrap(), vec![d]);
    }

    #[test]
    fn test_backdated_entry_seeds_from_earlier_entry_only() {
        let (journal, _temp_dir) = journal();
        let early = journal.prepare_entry(date(2024, 1, 1)).unwrap();
        fs::write(
            early.path(),
            "fecha: 01/01/2024\ntareas-pendientes:\n- from january first\n",
        )
        .unwrap();
        let late = journal.prepare_entry(date(2024, 3, 1)).unwrap();
        fs::write(
            late.path(),
            "fecha: 01/03/2024\ntareas-pendientes:\n- from march\n",
        )
        .unwrap();

        let mut middle = journal.prepare_entry(date(2024, 2, 1)).unwrap();

        assert_eq!(
            middle.document().unwrap().tasks_pending,
            vec!["", "from january first"]
        );
    }

    #[test]
    fn test_open_entry_hands_path_to_editor() {
        let (journal, _temp_dir) = journal();
        let editor = MockEditor::default();

        let path = journal.open_entry(date(2024, 1, 15), &editor).unwrap();

        assert_eq!(*editor.opened.borrow(), vec![path.clone()]);
        assert!(path.ends_with("2024/1/entry_2024_01_15.yml"));
    }

    #[test]
    fn test_open_last() {
        let (journal, _temp_dir) = journal();
        let editor = MockEditor::default();

        assert_eq!(journal.open_last(&editor).unwrap(), None);
        assert!(editor.opened.borrow().is_empty());

        journal.prepare_entry(date(2024, 1, 20)).unwrap();
        journal.prepare_entry(date(2024, 1, 10)).unwrap();

        let opened = journal.open_last(&editor).unwrap().expect("an entry");
        assert!(opened.ends_with("entry_2024_01_20.yml"));
    }

    #[test]
    fn test_missing_root_fails_before_touching_filesystem() {
        let temp_dir = tempdir().unwrap();
        let cache_dir = temp_dir.path().join("cache");
        let config = Config {
            root_dir: None,
            cache_dir: cache_dir.clone(),
            editor_override: None,
        };
        let journal = Journal::from_config(&config);
        let editor = MockEditor::default();

        assert!(matches!(
            journal.prepare_entry(date(2024, 1, 15)),
            Err(AppError::Config(_))
        ));
        assert!(matches!(journal.open_last(&editor), Err(AppError::Config(_))));
        assert!(!cache_dir.exists());
        assert!(editor.opened.borrow().is_empty());
    }
}
