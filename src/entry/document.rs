//! Structured content of a single journal entry.
//!
//! An entry is a small YAML mapping with a fixed set of keys:
//!
//! ```yaml
//! fecha: 15/01/2024
//! tareas-en-marcha:
//! - write the quarterly report
//! tareas-pendientes:
//! - ''
//! tareas-realizadas:
//! - ''
//! preguntas:
//! - ''
//! ```
//!
//! Lists are never empty: "nothing" is a single empty string, the placeholder
//! the user overwrites in the editor.

use crate::constants::{DOCUMENT_DATE_FORMAT, KEY_DATE};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};

/// The list used wherever there is nothing to write.
pub fn placeholder() -> Vec<String> {
    vec![String::new()]
}

/// One day's journal document.
///
/// Field order matches the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDocument {
    #[serde(rename = "fecha", with = "document_date")]
    pub date: NaiveDate,

    #[serde(
        rename = "tareas-en-marcha",
        default = "placeholder",
        deserialize_with = "task_list"
    )]
    pub tasks_running: Vec<String>,

    #[serde(
        rename = "tareas-pendientes",
        default = "placeholder",
        deserialize_with = "task_list"
    )]
    pub tasks_pending: Vec<String>,

    #[serde(
        rename = "tareas-realizadas",
        default = "placeholder",
        deserialize_with = "task_list"
    )]
    pub tasks_done: Vec<String>,

    #[serde(rename = "preguntas", default = "placeholder", deserialize_with = "task_list")]
    pub questions: Vec<String>,
}

impl EntryDocument {
    /// A fresh document for `date` with every list set to the placeholder.
    pub fn empty(date: NaiveDate) -> Self {
        EntryDocument {
            date,
            tasks_running: placeholder(),
            tasks_pending: placeholder(),
            tasks_done: placeholder(),
            questions: placeholder(),
        }
    }

    /// A document for `date` seeded from the previous entry.
    ///
    /// Everything that was running or pending becomes pending, running list first,
    /// verbatim: no filtering, no deduplication.
    ///
    /// # Examples
    ///
    /// ```
    /// use diario::entry::EntryDocument;
    /// use chrono::NaiveDate;
    ///
    /// let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    /// let mut previous = EntryDocument::empty(monday);
    /// previous.tasks_running = vec!["a".to_string()];
    /// previous.tasks_pending = vec!["b".to_string()];
    ///
    /// let tuesday = monday.succ_opt().unwrap();
    /// let seeded = EntryDocument::from_previous(tuesday, &previous);
    /// assert_eq!(seeded.tasks_pending, vec!["a", "b"]);
    /// assert_eq!(seeded.tasks_running, vec![""]);
    /// ```
    pub fn from_previous(date: NaiveDate, previous: &EntryDocument) -> Self {
        let carried: Vec<String> = previous
            .tasks_running
            .iter()
            .chain(previous.tasks_pending.iter())
            .cloned()
            .collect();

        EntryDocument {
            tasks_pending: if carried.is_empty() {
                placeholder()
            } else {
                carried
            },
            ..Self::empty(date)
        }
    }

    /// Hydrates a document from a raw YAML mapping.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Parse` when `fecha` is missing or not a `DD/MM/YYYY`
    /// date, or when a list holds something other than scalars.
    pub fn from_mapping(mapping: &Mapping) -> AppResult<Self> {
        if !mapping.contains_key(KEY_DATE) {
            return Err(AppError::Parse(format!(
                "Entry is missing the '{}' field",
                KEY_DATE
            )));
        }

        serde_yaml::from_value(Value::Mapping(mapping.clone()))
            .map_err(|e| AppError::Parse(format!("Malformed entry: {}", e)))
    }

    /// Serializes to the canonical mapping.
    pub fn to_mapping(&self) -> AppResult<Mapping> {
        match serde_yaml::to_value(self) {
            Ok(Value::Mapping(mapping)) => Ok(mapping),
            Ok(other) => Err(AppError::Parse(format!(
                "Entry serialized to a non-mapping value: {:?}",
                other
            ))),
            Err(e) => Err(AppError::Parse(format!("Failed to serialize entry: {}", e))),
        }
    }

    /// Parses the text of an entry file.
    pub fn from_yaml_str(raw: &str) -> AppResult<Self> {
        let value: Value = serde_yaml::from_str(raw)
            .map_err(|e| AppError::Parse(format!("Entry is not valid YAML: {}", e)))?;

        match value {
            Value::Mapping(mapping) => Self::from_mapping(&mapping),
            Value::Null => Err(AppError::Parse("Entry file is empty".to_string())),
            _ => Err(AppError::Parse(
                "Entry must be a mapping of keys to values".to_string(),
            )),
        }
    }

    /// Renders the text written to an entry file.
    pub fn to_yaml_string(&self) -> AppResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| AppError::Parse(format!("Failed to serialize entry: {}", e)))
    }
}

/// `fecha` is stored as `DD/MM/YYYY`.
mod document_date {
    use super::DOCUMENT_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DOCUMENT_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(raw.trim(), DOCUMENT_DATE_FORMAT).map_err(|e| {
            de::Error::custom(format!("invalid date '{}', expected DD/MM/YYYY: {}", raw, e))
        })
    }
}

/// Accepts a list of scalars, an empty list or nothing at all.
///
/// Blank keys (`tareas-pendientes:` with no items) and empty lists collapse to the
/// placeholder; `null` items become empty strings; numbers and booleans are kept
/// as the text the user typed.
fn task_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    use serde::de::Error;

    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let tasks = items
        .into_iter()
        .map(|item| match item {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(D::Error::custom(format!(
                "list items must be plain text, found {:?}",
                other
            ))),
        })
        .collect::<Result<Vec<String>, D::Error>>()?;

    Ok(if tasks.is_empty() { placeholder() } else { tasks })
}
