//! Date-keyed file layout of the journal.
//!
//! Every entry lives at `<root>/<year>/<month>/entry_<YYYY>_<MM>_<DD>.yml`, with the
//! month directory using the unpadded month number. `DateKeyedStore` is the only
//! place that knows this layout.

use crate::config::Config;
use crate::constants::{
    ENTRY_FILE_DATE_FORMAT, ENTRY_FILE_EXTENSION, ENTRY_FILE_PREFIX, ENV_VAR_DIARIO_ROOT,
};
use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::fs::DirBuilder;
#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static ENTRY_FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{}(?P<year>\d{{4}})_(?P<month>\d{{2}})_(?P<day>\d{{2}})\.{}$",
        regex::escape(ENTRY_FILE_PREFIX),
        regex::escape(ENTRY_FILE_EXTENSION)
    ))
    .expect("entry file name pattern is a valid regex")
});

/// Maps calendar dates to entry file paths under the configured root.
///
/// The root stays optional so that a missing `DIARIO_ROOT` surfaces as a
/// configuration error on the first operation that needs it, never earlier.
#[derive(Debug, Clone)]
pub struct DateKeyedStore {
    root: Option<PathBuf>,
}

impl DateKeyedStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DateKeyedStore {
            root: Some(root.into()),
        }
    }

    /// Creates a store from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        DateKeyedStore {
            root: config.root_dir.clone(),
        }
    }

    /// Returns the root directory or a configuration error when it is unset.
    ///
    /// Every entry operation goes through this before touching the filesystem.
    pub fn root(&self) -> AppResult<&Path> {
        self.root.as_deref().ok_or_else(|| {
            AppError::Config(format!(
                "{} is not set. Point it at the directory that holds your journal",
                ENV_VAR_DIARIO_ROOT
            ))
        })
    }

    /// Directory holding every entry of the month `date` falls in.
    pub fn container_for(&self, date: NaiveDate) -> AppResult<PathBuf> {
        Ok(self
            .root()?
            .join(date.year().to_string())
            .join(date.month().to_string()))
    }

    /// Deterministic path of the entry for `date`.
    ///
    /// # Examples
    ///
    /// ```
    /// use diario::store::DateKeyedStore;
    /// use chrono::NaiveDate;
    /// use std::path::PathBuf;
    ///
    /// let store = DateKeyedStore::new("/journal");
    /// let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    /// assert_eq!(
    ///     store.path_for(date).unwrap(),
    ///     PathBuf::from("/journal/2024/1/entry_2024_01_05.yml")
    /// );
    /// ```
    pub fn path_for(&self, date: NaiveDate) -> AppResult<PathBuf> {
        Ok(self.container_for(date)?.join(entry_filename(date)))
    }

    /// Creates the year/month directory of `date` if it does not exist yet.
    ///
    /// Idempotent. Every directory level it creates (year and month) gets owner-only
    /// permissions on unix; existing ones are left as they are.
    pub fn ensure_container(&self, date: NaiveDate) -> AppResult<PathBuf> {
        let container = self.container_for(date)?;
        if container.is_dir() {
            return Ok(container);
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(crate::constants::DEFAULT_DIR_PERMISSIONS);

        builder.create(&container).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create entry directory {}: {}",
                    container.display(),
                    e
                ),
            ))
        })?;
        debug!("Created entry directory {:?}", container);

        Ok(container)
    }
}

/// File name of the entry for `date`, e.g. `entry_2024_01_05.yml`.
pub fn entry_filename(date: NaiveDate) -> String {
    format!(
        "{}{}.{}",
        ENTRY_FILE_PREFIX,
        date.format(ENTRY_FILE_DATE_FORMAT),
        ENTRY_FILE_EXTENSION
    )
}

/// Whether `name` is exactly an entry file name.
///
/// Used to tell entry files apart from anything else lying in the journal tree.
pub fn filename_matches_format(name: &str) -> bool {
    ENTRY_FILENAME_RE.is_match(name)
}

/// Extracts the date embedded in an entry file name.
///
/// # Errors
///
/// Returns `AppError::Parse` if `name` does not follow the entry file format or
/// names an impossible date. Callers are expected to pre-filter with
/// [`filename_matches_format`].
pub fn date_from_filename(name: &str) -> AppResult<NaiveDate> {
    let caps = ENTRY_FILENAME_RE
        .captures(name)
        .ok_or_else(|| AppError::Parse(format!("Not an entry file name: {}", name)))?;

    let field = |key: &str| -> AppResult<u32> {
        caps[key]
            .parse()
            .map_err(|e| AppError::Parse(format!("Invalid {} in {}: {}", key, name, e)))
    };
    let year = caps["year"]
        .parse::<i32>()
        .map_err(|e| AppError::Parse(format!("Invalid year in {}: {}", name, e)))?;

    NaiveDate::from_ymd_opt(year, field("month")?, field("day")?)
        .ok_or_else(|| AppError::Parse(format!("Impossible date in file name: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_path_for_is_deterministic() {
        let store = DateKeyedStore::new("/journal");
        let d = date(2023, 11, 30);

        let first = store.path_for(d).unwrap();
        let second = store.path_for(d).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, PathBuf::from("/journal/2023/11/entry_2023_11_30.yml"));
    }

    #[test]
    fn test_path_for_without_root_is_config_error() {
        let store = DateKeyedStore { root: None };

        match store.path_for(date(2024, 1, 1)) {
            Err(AppError::Config(_)) => {}
            other => panic!("Expected AppError::Config, got {:?}", other),
        }
        assert!(matches!(
            store.ensure_container(date(2024, 1, 1)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_ensure_container_creates_and_is_idempotent() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let store = DateKeyedStore::new(temp_dir.path());
        let d = date(2024, 2, 15);

        let container = store.ensure_container(d).expect("first call");
        assert_eq!(container, temp_dir.path().join("2024").join("2"));
        assert!(container.is_dir());

        store.ensure_container(d).expect("second call");
        assert!(container.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            for dir in [temp_dir.path().join("2024"), container] {
                let metadata = fs::metadata(&dir).expect("Failed to get directory metadata");
                assert_eq!(metadata.permissions().mode() & 0o777, 0o700, "{:?}", dir);
            }
        }
    }

    #[test]
    fn test_ensure_container_keeps_existing_year_directory() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let store = DateKeyedStore::new(temp_dir.path());
        fs::create_dir(temp_dir.path().join("2024")).unwrap();

        let container = store.ensure_container(date(2024, 3, 1)).unwrap();

        assert_eq!(container, temp_dir.path().join("2024").join("3"));
        assert!(container.is_dir());
    }

    #[test]
    fn test_filename_pattern_agrees_with_writer() {
        for d in [date(2024, 1, 5), date(1999, 12, 31), date(2020, 2, 29)] {
            let name = entry_filename(d);
            assert!(filename_matches_format(&name), "{}", name);
            assert_eq!(date_from_filename(&name).unwrap(), d);
        }
        assert!(!filename_matches_format("entryX2024_01_01.yml"));
        assert!(!filename_matches_format("entry_2024_01_01Xyml"));
    }

    #[test]
    fn test_filename_matches_format() {
        assert!(filename_matches_format("entry_2024_01_01.yml"));
        assert!(filename_matches_format("entry_1999_12_31.yml"));

        assert!(!filename_matches_format("readme.txt"));
        assert!(!filename_matches_format("entry_2024_1_01.yml"));
        assert!(!filename_matches_format("entry_20240101.yml"));
        assert!(!filename_matches_format("entry_2024_01_01.yml.bak"));
        assert!(!filename_matches_format("xentry_2024_01_01.yml"));
        assert!(!filename_matches_format("entry_2024_01_01.yaml"));
    }

    #[test]
    fn test_date_from_filename() {
        assert_eq!(
            date_from_filename("entry_2024_02_15.yml").unwrap(),
            date(2024, 2, 15)
        );
        assert_eq!(
            date_from_filename(&entry_filename(date(2020, 2, 29))).unwrap(),
            date(2020, 2, 29)
        );
    }

    #[test]
    fn test_date_from_filename_rejects_non_entries() {
        assert!(matches!(
            date_from_filename("readme.txt"),
            Err(AppError::Parse(_))
        ));
        assert!(matches!(
            date_from_filename("entry_2023_02_30.yml"),
            Err(AppError::Parse(_))
        ));
    }
}
