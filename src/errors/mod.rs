//! Error handling utilities for the diario application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// Each variant captures the editor command and, where there is one, the underlying
/// IO error so the full chain can be reported.
///
/// # Examples
///
/// ```
/// use diario::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
///
/// A non-zero exit keeps the editor's status code so it can be propagated:
///
/// ```
/// use diario::errors::EditorError;
///
/// let error = EditorError::NonZeroExit {
///     command: "nano".to_string(),
///     status_code: 3,
/// };
///
/// assert!(format!("{}", error).contains("non-zero status code: 3"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Represents all possible errors that can occur in the diario application.
///
/// The variants follow the three failure classes of the tool: configuration
/// problems, filesystem problems and malformed data, plus editor failures.
///
/// # Examples
///
/// ```
/// use diario::errors::AppError;
///
/// let error = AppError::Config("DIARIO_ROOT is not set".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: DIARIO_ROOT is not set");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed entry documents or dates.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

impl AppError {
    /// Exit code the process should terminate with for this error.
    ///
    /// A failing editor hands its own status code through; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Editor(EditorError::NonZeroExit { status_code, .. }) => *status_code,
            _ => 1,
        }
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
