/*!
# Diario

Diario is a small daily journal. Running it opens today's entry in your editor,
creating it first if needed. A new entry starts with every task that was still
running or pending in the previous entry, so unfinished work follows you from
one day to the next.

## Layout

Entries are YAML files under `$DIARIO_ROOT/<year>/<month>/entry_<YYYY>_<MM>_<DD>.yml`.
A recency log in the cache directory remembers which dates have entries so the
previous entry is found without walking the whole tree.

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `store`: Mapping from dates to entry files
- `entry`: Entry documents and the repository that creates and loads them
- `index`: The recency log
- `editor`: Launching the external editor
- `journal`: The workflow tying it all together

## Usage Example

```rust,no_run
use diario::editor::{EditorChoice, SystemEditor};
use diario::{Config, Journal};

fn main() -> diario::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let editor = SystemEditor::resolve(EditorChoice::Vim, config.editor_override.as_deref());
    let today = chrono::Local::now().date_naive();

    Journal::from_config(&config).open_entry(today, &editor)?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Centralized constants
pub mod constants;
/// External editor integration
pub mod editor;
/// Entry documents and their repository
pub mod entry;
/// Error types and utilities for error handling
pub mod errors;
/// Recency log of entry dates
pub mod index;
/// The journal workflow
pub mod journal;
/// Date-to-path layout of the journal tree
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use entry::{Entry, EntryDocument, EntryRepository};
pub use errors::{AppError, AppResult};
pub use index::RecencyIndex;
pub use journal::Journal;
pub use store::DateKeyedStore;
