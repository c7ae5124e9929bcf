// src/entity/note.rs
use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{apply, CsvRow, Record};
use crate::error::Result;

pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Current local time in the note timestamp format.
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub timestamp: String,
}

impl Note {
    pub fn new(id: u32, title: String, content: String) -> Self {
        Self {
            id,
            title,
            content,
            timestamp: now_timestamp(),
        }
    }

    /// Apply an edit. The timestamp advances even when nothing else changes.
    pub fn apply(&mut self, update: NoteUpdate) {
        apply(&mut self.title, update.title);
        apply(&mut self.content, update.content);
        self.timestamp = now_timestamp();
    }
}

/// Update payload for a note
#[derive(Debug, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Record for Note {
    const KIND: &'static str = "Note";
    const CSV_HEADER: &'static [&'static str] = &["id", "title", "content", "timestamp"];

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.content.clone(),
            self.timestamp.clone(),
        ]
    }

    fn from_csv_row(row: &CsvRow<'_>, id: u32) -> Result<Self> {
        let timestamp = match row.get("timestamp")? {
            "" => now_timestamp(),
            stamp => stamp.to_string(),
        };
        Ok(Self {
            id,
            title: row.get("title")?.to_string(),
            content: row.get("content")?.to_string(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use csv::StringRecord;

    #[test]
    fn test_new_note_is_stamped() {
        let note = Note::new(1, "Title".to_string(), "Body".to_string());
        assert!(NaiveDateTime::parse_from_str(&note.timestamp, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_blank_update_only_touches_timestamp() {
        let mut note = Note::new(1, "Title".to_string(), "Body".to_string());
        note.timestamp = "01-01-2000 00:00:00".to_string();

        note.apply(NoteUpdate::default());

        assert_eq!(note.title, "Title");
        assert_eq!(note.content, "Body");
        assert_ne!(note.timestamp, "01-01-2000 00:00:00");
    }

    #[test]
    fn test_from_csv_keeps_imported_timestamp() {
        let headers = StringRecord::from(vec!["id", "title", "content", "timestamp"]);
        let record = StringRecord::from(vec!["42", "T", "C", "02-03-2024 10:11:12"]);

        let note = Note::from_csv_row(&CsvRow::new(&headers, &record), 5).unwrap();

        assert_eq!(note.id, 5);
        assert_eq!(note.timestamp, "02-03-2024 10:11:12");
    }

    #[test]
    fn test_json_field_names() {
        let note = Note {
            id: 3,
            title: "a".to_string(),
            content: "b".to_string(),
            timestamp: "01-01-2025 08:00:00".to_string(),
        };
        let value = serde_json::to_value(&note).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["content", "id", "timestamp", "title"]);
    }
}
