// src/entity/contact.rs
use serde::{Deserialize, Serialize};

use super::{apply, CsvRow, Record};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(id: u32, name: String, phone: String, email: String) -> Self {
        Self {
            id,
            name,
            phone,
            email,
        }
    }

    /// Case-sensitive substring match on name or phone.
    pub fn matches(&self, query: &str) -> bool {
        self.name.contains(query) || self.phone.contains(query)
    }

    pub fn apply(&mut self, update: ContactUpdate) {
        apply(&mut self.name, update.name);
        apply(&mut self.phone, update.phone);
        apply(&mut self.email, update.email);
    }
}

/// Update payload for a contact
#[derive(Debug, Default)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Record for Contact {
    const KIND: &'static str = "Contact";
    const CSV_HEADER: &'static [&'static str] = &["id", "name", "phone", "email"];

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.phone.clone(),
            self.email.clone(),
        ]
    }

    fn from_csv_row(row: &CsvRow<'_>, id: u32) -> Result<Self> {
        Ok(Self::new(
            id,
            row.get("name")?.to_string(),
            row.get("phone")?.to_string(),
            row.get("email")?.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Contact {
        Contact::new(
            1,
            "Ada Lovelace".to_string(),
            "+44 20 1234".to_string(),
            "ada@example.com".to_string(),
        )
    }

    #[test]
    fn test_matches_name_or_phone() {
        let contact = ada();
        assert!(contact.matches("Ada"));
        assert!(contact.matches("1234"));
        assert!(contact.matches(""));
        assert!(!contact.matches("example.com"));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        assert!(!ada().matches("ada lovelace"));
    }

    #[test]
    fn test_update_keeps_blank_fields() {
        let mut contact = ada();
        contact.apply(ContactUpdate {
            email: Some("ada@analytical.engine".to_string()),
            ..Default::default()
        });
        assert_eq!(contact.name, "Ada Lovelace");
        assert_eq!(contact.phone, "+44 20 1234");
        assert_eq!(contact.email, "ada@analytical.engine");
    }
}
