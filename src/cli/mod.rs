use crate::constants::{APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use crate::editor::EditorChoice;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

/// Output format of the diagnostic log written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// A daily journal that carries unfinished tasks forward
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Editor used to open the entry
    #[clap(short = 'e', long, value_enum, default_value_t = EditorChoice::Vim)]
    pub editor: EditorChoice,

    /// Opens (creating if needed) the entry for a specific date (format: YYYY-MM-DD or YYYYMMDD)
    #[clap(short = 'd', long, conflicts_with = "last")]
    pub date: Option<String>,

    /// Opens the most recent existing entry instead of today's
    #[clap(short = 'l', long)]
    pub last: bool,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Format of log messages
    #[clap(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// The date the run is about: `--date` if given, otherwise `today`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Parse` if `--date` is neither `YYYY-MM-DD` nor `YYYYMMDD`.
    pub fn target_date(&self, today: NaiveDate) -> AppResult<NaiveDate> {
        match &self.date {
            Some(raw) => parse_date_arg(raw),
            None => Ok(today),
        }
    }
}

fn parse_date_arg(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT_COMPACT))
        .map_err(|e| AppError::Parse(format!("Invalid date format '{}': {}", raw, e)))
}
