//! Configuration management for the diario application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables. The loaded `Config` is passed explicitly to the components that need it,
//! so nothing else in the crate reads the process environment.
//!
//! # Environment Variables
//!
//! - `DIARIO_ROOT`: Root directory of the journal. Required by every entry operation;
//!   its absence is reported as a configuration error at first use.
//! - `DIARIO_CACHE_DIR`: Directory holding the recency log (defaults to the platform
//!   cache directory, or `$HOME` when there is none)
//! - `DIARIO_EDITOR`: Replaces the command of the editor chosen on the command line

use crate::constants::{
    EDITOR_FORBIDDEN_CHARS, ENV_VAR_DIARIO_CACHE_DIR, ENV_VAR_DIARIO_EDITOR, ENV_VAR_DIARIO_ROOT,
    ENV_VAR_HOME, RECENCY_LOG_FILE_NAME, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the diario application.
///
/// # Examples
///
/// ```
/// use diario::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     root_dir: Some(PathBuf::from("/home/me/diario")),
///     cache_dir: PathBuf::from("/home/me/.cache"),
///     editor_override: None,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct Config {
    /// Root of the `<year>/<month>/` entry hierarchy, from `DIARIO_ROOT`.
    ///
    /// `None` when the variable is unset; see [`DateKeyedStore::root`](crate::store::DateKeyedStore::root).
    pub root_dir: Option<PathBuf>,

    /// Directory containing the recency log.
    pub cache_dir: PathBuf,

    /// Editor command that replaces the enumerated editor choice, from `DIARIO_EDITOR`.
    pub editor_override: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("root_dir", &self.root_dir.as_ref().map(|_| REDACTED_PLACEHOLDER))
            .field("cache_dir", &REDACTED_PLACEHOLDER)
            .field(
                "editor_override",
                &self.editor_override.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - A path fails `shellexpand` expansion
    /// - `DIARIO_EDITOR` is set but fails validation
    /// - No cache directory can be determined
    ///
    /// A missing `DIARIO_ROOT` is *not* an error here.
    pub fn load() -> AppResult<Self> {
        Self::from_values(
            env::var(ENV_VAR_DIARIO_ROOT).ok(),
            env::var(ENV_VAR_DIARIO_CACHE_DIR).ok(),
            env::var(ENV_VAR_DIARIO_EDITOR).ok(),
        )
    }

    /// Builds a configuration from raw variable values, as `load` does with the environment.
    pub fn from_values(
        root: Option<String>,
        cache: Option<String>,
        editor: Option<String>,
    ) -> AppResult<Self> {
        let root_dir = root
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| expand_path(&raw))
            .transpose()?;

        let cache_dir = match cache.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => expand_path(&raw)?,
            None => default_cache_dir()?,
        };

        let editor_override = editor
            .map(|raw| Self::validate_editor_command(&raw).map(str::to_string))
            .transpose()?;

        Ok(Config {
            root_dir,
            cache_dir,
            editor_override,
        })
    }

    /// Full path of the recency log.
    pub fn recency_log_path(&self) -> PathBuf {
        self.cache_dir.join(RECENCY_LOG_FILE_NAME)
    }

    /// Validates an editor command string for security.
    ///
    /// The command must be non-empty, contain no spaces and no shell metacharacters.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = editor_cmd
            .chars()
            .find(|ch| EDITOR_FORBIDDEN_CHARS.contains(ch))
        {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the root directory (when set) or the cache
    /// directory is not an absolute path.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(root) = &self.root_dir {
            if !root.is_absolute() {
                return Err(AppError::Config(format!(
                    "{} must be an absolute path",
                    ENV_VAR_DIARIO_ROOT
                )));
            }
        }

        if !self.cache_dir.is_absolute() {
            return Err(AppError::Config(
                "Cache directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }
}

/// Expands `~` and environment variable references in a configured path.
fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn default_cache_dir() -> AppResult<PathBuf> {
    dirs::cache_dir()
        .or_else(|| env::var_os(ENV_VAR_HOME).map(PathBuf::from))
        .ok_or_else(|| {
            AppError::Config(format!(
                "Could not determine a cache directory. Set {}",
                ENV_VAR_DIARIO_CACHE_DIR
            ))
        })
}
