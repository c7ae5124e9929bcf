// src/entity/finance.rs
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CsvRow, Record, DATE_FORMAT};
use crate::error::{AssistantError, Result};

/// A single income (positive amount) or expense (negative amount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl FinanceRecord {
    pub fn new(id: u32, amount: Decimal, category: String, date: String, description: String) -> Self {
        Self {
            id,
            amount,
            category,
            date,
            description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// The record date as a calendar date, if it is in `DD-MM-YYYY` form.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }
}

/// Parse a user- or file-supplied amount.
pub fn parse_amount(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| AssistantError::InvalidInput {
        field: "amount",
        value: value.to_string(),
    })
}

impl Record for FinanceRecord {
    const KIND: &'static str = "Finance record";
    const CSV_HEADER: &'static [&'static str] =
        &["id", "amount", "category", "date", "description"];

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.amount.to_string(),
            self.category.clone(),
            self.date.clone(),
            self.description.clone(),
        ]
    }

    fn from_csv_row(row: &CsvRow<'_>, id: u32) -> Result<Self> {
        Ok(Self::new(
            id,
            parse_amount(row.get("amount")?)?,
            row.get("category")?.to_string(),
            row.get("date")?.to_string(),
            row.get("description")?.to_string(),
        ))
    }
}
