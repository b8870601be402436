/*!
# Diario - A Daily Journal

Opens today's journal entry in an editor, creating it from the previous entry's
unfinished tasks when it does not exist yet.

## Usage

```
diario [OPTIONS]

Options:
  -e, --editor <EDITOR>          Editor used to open the entry [default: vim] [possible values: vim, vscode, nano]
  -d, --date <DATE>              Opens the entry for a specific date (format: YYYY-MM-DD or YYYYMMDD)
  -l, --last                     Opens the most recent existing entry instead of today's
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Format of log messages [default: text] [possible values: text, json]
  -h, --help                     Print help
  -V, --version                  Print version
```

## Configuration

- `DIARIO_ROOT`: Directory holding the journal (required)
- `DIARIO_CACHE_DIR`: Directory of the recency log (defaults to the platform cache directory)
- `DIARIO_EDITOR`: Command replacing the editor selected with `--editor`
- `RUST_LOG`: Log filter, overridden by `--verbose`
*/

use chrono::Local;
use diario::cli::{CliArgs, LogFormat};
use diario::config::Config;
use diario::constants::{
    DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use diario::editor::SystemEditor;
use diario::errors::AppResult;
use diario::journal::Journal;
use std::process;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose, args.log_format);

    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %uuid::Uuid::new_v4()
    );
    let _guard = root_span.enter();

    debug!("CLI arguments: {:?}", args);

    let code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    debug!("Exiting with status {}", code);
    process::exit(code);
}

/// Runs one invocation: load configuration, then open the requested entry.
fn run(args: &CliArgs) -> AppResult<()> {
    // Truncated to the day; entries have no time of day.
    let today = Local::now().date_naive();
    let date = args.target_date(today)?;

    info!("Loading configuration");
    let config = Config::load()?;
    config.validate()?;

    let editor = SystemEditor::resolve(args.editor, config.editor_override.as_deref());
    let journal = Journal::from_config(&config);

    if args.last {
        journal.open_last(&editor)?;
    } else {
        let path = journal.open_entry(date, &editor)?;
        info!("Closed entry {:?}", path);
    }

    Ok(())
}

/// Installs the global subscriber writing to stderr.
///
/// `RUST_LOG` is honoured unless `--verbose` forces debug output.
fn init_tracing(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
