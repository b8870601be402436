#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway journal root and cache directory.
pub struct TestJournal {
    pub temp_dir: TempDir,
}

impl TestJournal {
    pub fn new() -> Self {
        TestJournal {
            temp_dir: tempfile::tempdir().expect("Failed to create temporary directory"),
        }
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("journal")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.temp_dir.path().join("cache")
    }

    pub fn log_path(&self) -> PathBuf {
        self.cache_dir().join(".dairies_logs.log")
    }

    pub fn entry_path(&self, year: i32, month: u32, day: u32) -> PathBuf {
        self.root()
            .join(year.to_string())
            .join(month.to_string())
            .join(format!("entry_{:04}_{:02}_{:02}.yml", year, month, day))
    }

    /// A `diario` command pointed at this journal, using `echo` as the editor.
    pub fn command(&self) -> Command {
        let mut cmd = base_diario_command();
        cmd.env("DIARIO_ROOT", self.root())
            .env("DIARIO_CACHE_DIR", self.cache_dir())
            .env("DIARIO_EDITOR", "echo");
        cmd
    }
}

/// Creates a `Command` for the `diario` binary with a clean, non-interactive environment.
pub fn base_diario_command() -> Command {
    let mut cmd = Command::cargo_bin("diario").expect("diario binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd
}

/// Writes `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("path has a parent"))
        .expect("Failed to create parent directories");
    std::fs::write(path, content).expect("Failed to write file");
}
