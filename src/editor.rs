//! Editor abstraction for opening journal files.
//!
//! This module provides an abstraction for opening files in an external editor,
//! allowing the application to work with different editors and to be testable
//! by mocking the editor functionality.

use crate::constants::{EDITOR_CMD_NANO, EDITOR_CMD_VIM, EDITOR_CMD_VSCODE};
use crate::errors::{AppResult, EditorError};
use clap::ValueEnum;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// The editors selectable with `--editor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EditorChoice {
    /// Vim, the default terminal editor
    #[default]
    Vim,
    /// Visual Studio Code
    Vscode,
    /// GNU nano
    Nano,
}

impl EditorChoice {
    /// The external command launched for this choice.
    pub fn command(self) -> &'static str {
        match self {
            EditorChoice::Vim => EDITOR_CMD_VIM,
            EditorChoice::Vscode => EDITOR_CMD_VSCODE,
            EditorChoice::Nano => EDITOR_CMD_NANO,
        }
    }
}

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use diario::editor::Editor;
/// use diario::errors::AppResult;
/// use std::path::Path;
///
/// struct DummyEditor;
///
/// impl Editor for DummyEditor {
///     fn open(&self, path: &Path) -> AppResult<()> {
///         println!("Would open {}", path.display());
///         Ok(())
///     }
/// }
///
/// DummyEditor.open(Path::new("entry_2024_01_15.yml")).unwrap();
/// ```
pub trait Editor {
    /// Opens `path` and blocks until the user is done with it.
    fn open(&self, path: &Path) -> AppResult<()>;
}

/// An implementation of the Editor trait that runs an external command.
///
/// ```no_run
/// use diario::editor::{Editor, SystemEditor};
/// use std::path::Path;
///
/// let editor = SystemEditor::new("nano");
/// editor.open(Path::new("/tmp/entry_2024_01_15.yml")).expect("editor failed");
/// ```
#[derive(Debug, Clone)]
pub struct SystemEditor {
    /// The command to use for opening files (e.g., "vim", "code", "nano").
    pub editor_cmd: String,
}

impl SystemEditor {
    pub fn new(editor_cmd: impl Into<String>) -> Self {
        SystemEditor {
            editor_cmd: editor_cmd.into(),
        }
    }

    /// The editor for a command-line choice, unless an override command is configured.
    pub fn resolve(choice: EditorChoice, override_cmd: Option<&str>) -> Self {
        Self::new(override_cmd.unwrap_or(choice.command()))
    }
}

impl Editor for SystemEditor {
    /// Runs the editor on `path` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Editor` with:
    /// - `EditorError::CommandNotFound` if the editor command doesn't exist
    /// - `EditorError::PermissionDenied` if permission is denied to execute the editor
    /// - `EditorError::ExecutionFailed` for other I/O errors during execution
    /// - `EditorError::NonZeroExit` if the editor exits with a non-zero status code
    fn open(&self, path: &Path) -> AppResult<()> {
        let command = self.editor_cmd.clone();
        debug!("Launching editor: {} {:?}", command, path);

        match Command::new(&self.editor_cmd).arg(path).status() {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(EditorError::NonZeroExit {
                command,
                status_code: status.code().unwrap_or(-1),
            }
            .into()),
            Err(e) => {
                let specific_error = match e.kind() {
                    std::io::ErrorKind::NotFound => EditorError::CommandNotFound {
                        command,
                        source: e,
                    },
                    std::io::ErrorKind::PermissionDenied => EditorError::PermissionDenied {
                        command,
                        source: e,
                    },
                    _ => EditorError::ExecutionFailed { command, source: e },
                };
                Err(specific_error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_choice_commands() {
        assert_eq!(EditorChoice::default(), EditorChoice::Vim);
        assert_eq!(EditorChoice::Vim.command(), "vim");
        assert_eq!(EditorChoice::Vscode.command(), "code");
        assert_eq!(EditorChoice::Nano.command(), "nano");
    }

    #[test]
    fn test_resolve_prefers_override() {
        assert_eq!(
            SystemEditor::resolve(EditorChoice::Nano, None).editor_cmd,
            "nano"
        );
        assert_eq!(
            SystemEditor::resolve(EditorChoice::Nano, Some("echo")).editor_cmd,
            "echo"
        );
    }

    #[test]
    fn test_missing_command_maps_to_command_not_found() {
        let editor = SystemEditor::new("diario-no-such-editor-xyz");

        match editor.open(Path::new("/tmp/whatever.yml")) {
            Err(AppError::Editor(EditorError::CommandNotFound { command, .. })) => {
                assert_eq!(command, "diario-no-such-editor-xyz");
            }
            other => panic!("Expected CommandNotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_kept() {
        assert!(SystemEditor::new("true").open(Path::new("x")).is_ok());

        match SystemEditor::new("false").open(Path::new("x")) {
            Err(AppError::Editor(EditorError::NonZeroExit { status_code, .. })) => {
                assert_eq!(status_code, 1);
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }
}
