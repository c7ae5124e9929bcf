mod contact;
mod finance;
mod note;
mod task;

pub use contact::{Contact, ContactUpdate};
pub use finance::{parse_amount, FinanceRecord};
pub use note::{now_timestamp, Note, NoteUpdate, TIMESTAMP_FORMAT};
pub use task::{Task, TaskUpdate, DEFAULT_PRIORITY};

use csv::StringRecord;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AssistantError, Result};

/// Date format used by tasks and finance records (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// A flat record stored in one collection file.
///
/// JSON comes from the serde derive. CSV is explicit: a fixed header order on
/// export and a validated constructor on import.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Human-readable name used in messages ("Note", "Task", ...).
    const KIND: &'static str;

    /// CSV header, in export order. Always starts with `id`.
    const CSV_HEADER: &'static [&'static str];

    fn id(&self) -> u32;

    fn set_id(&mut self, id: u32);

    fn to_csv_row(&self) -> Vec<String>;

    /// Build a record from an imported row. The row's own `id` column is
    /// ignored; the caller supplies the freshly assigned one.
    fn from_csv_row(row: &CsvRow<'_>, id: u32) -> Result<Self>;
}

/// A CSV data row addressed by header name.
pub struct CsvRow<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    pub fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Self { headers, record }
    }

    /// Value of a required column.
    pub fn get(&self, field: &'static str) -> Result<&'a str> {
        self.optional(field)
            .ok_or(AssistantError::MissingField(field))
    }

    /// Value of a column that may be absent from the header.
    pub fn optional(&self, field: &str) -> Option<&'a str> {
        let index = self.headers.iter().position(|h| h.trim() == field)?;
        self.record.get(index)
    }
}

/// Replace `current` with `update` when the update carries a value.
pub(crate) fn apply<T>(current: &mut T, update: Option<T>) {
    if let Some(value) = update {
        *current = value;
    }
}
