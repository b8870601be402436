//! Constants used throughout the application.
//!
//! This module contains all constants used in the diario application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "diario";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A daily journal that carries unfinished tasks forward";

// CLI Arguments & Defaults
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Editors
/// Command for the primary (default) editor.
pub const EDITOR_CMD_VIM: &str = "vim";
/// Command for the secondary editor.
pub const EDITOR_CMD_VSCODE: &str = "code";
/// Command for the tertiary editor.
pub const EDITOR_CMD_NANO: &str = "nano";

// Configuration Keys & Environment Variables
/// Environment variable holding the root directory of the journal.
pub const ENV_VAR_DIARIO_ROOT: &str = "DIARIO_ROOT";
/// Environment variable overriding the directory of the recency log.
pub const ENV_VAR_DIARIO_CACHE_DIR: &str = "DIARIO_CACHE_DIR";
/// Environment variable overriding the editor command of the chosen editor.
pub const ENV_VAR_DIARIO_EDITOR: &str = "DIARIO_EDITOR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";

// Validation
/// Characters forbidden in editor commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Prefix of every entry file name.
pub const ENTRY_FILE_PREFIX: &str = "entry_";
/// Extension of every entry file (without the dot).
pub const ENTRY_FILE_EXTENSION: &str = "yml";
/// Format of the date embedded in entry file names.
pub const ENTRY_FILE_DATE_FORMAT: &str = "%Y_%m_%d";
/// Name of the recency log inside the cache directory.
pub const RECENCY_LOG_FILE_NAME: &str = ".dairies_logs.log";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD), also used by the recency log.
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Date format stored in the `fecha` field of entry documents.
pub const DOCUMENT_DATE_FORMAT: &str = "%d/%m/%Y";

// Entry Document Keys
/// Key of the entry date.
pub const KEY_DATE: &str = "fecha";
/// Key of the tasks in progress.
pub const KEY_TASKS_RUNNING: &str = "tareas-en-marcha";
/// Key of the pending tasks.
pub const KEY_TASKS_PENDING: &str = "tareas-pendientes";
/// Key of the finished tasks.
pub const KEY_TASKS_DONE: &str = "tareas-realizadas";
/// Key of the open questions.
pub const KEY_QUESTIONS: &str = "preguntas";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "diario";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
