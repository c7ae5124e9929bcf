use std::fmt;
use std::io::{BufRead, Write};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use super::{export_records, import_records, Console, Menu};
use crate::config::DateFilter;
use crate::entity::{parse_amount, FinanceRecord, DATE_FORMAT};
use crate::error::{AssistantError, Result};
use crate::storage::RecordStore;

/// Income, expense and balance over a date range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinanceReport {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

impl FinanceReport {
    fn from_records<'a>(records: impl IntoIterator<Item = &'a FinanceRecord>) -> Result<Self> {
        let mut report = Self::default();
        for record in records {
            if record.is_income() {
                report.total_income = checked_sum(report.total_income, record.amount, "income")?;
            } else if record.is_expense() {
                report.total_expense =
                    checked_sum(report.total_expense, record.amount, "expenses")?;
            }
        }
        report.balance = checked_sum(report.total_income, report.total_expense, "balance")?;
        Ok(report)
    }
}

fn checked_sum(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(AssistantError::Overflow(what))
}

impl fmt::Display for FinanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total income: {}", self.total_income)?;
        writeln!(f, "Total expenses: {}", self.total_expense)?;
        write!(f, "Balance: {}", self.balance)
    }
}

pub struct FinanceController {
    store: RecordStore<FinanceRecord>,
    date_filter: DateFilter,
}

impl FinanceController {
    pub fn new(store: RecordStore<FinanceRecord>, date_filter: DateFilter) -> Self {
        Self { store, date_filter }
    }

    pub fn store(&self) -> &RecordStore<FinanceRecord> {
        &self.store
    }

    pub fn add(
        &mut self,
        amount: Decimal,
        category: String,
        date: String,
        description: String,
    ) -> Result<&FinanceRecord> {
        self.store
            .add(|id| FinanceRecord::new(id, amount, category, date, description))
    }

    /// Totals for records dated within `[start, end]`, both inclusive.
    pub fn report(&self, start: &str, end: &str) -> Result<FinanceReport> {
        let records = self.store.records();
        match self.date_filter {
            DateFilter::Lexicographic => FinanceReport::from_records(
                records
                    .iter()
                    .filter(|r| start <= r.date.as_str() && r.date.as_str() <= end),
            ),
            DateFilter::Calendar => {
                let start = parse_bound(start, "start date")?;
                let end = parse_bound(end, "end date")?;
                FinanceReport::from_records(records.iter().filter(|r| {
                    match r.calendar_date() {
                        Some(date) => start <= date && date <= end,
                        None => {
                            warn!(id = r.id, date = %r.date, "skipping record with unparseable date");
                            false
                        }
                    }
                }))
            }
        }
    }

    /// Read a report bound, re-prompting when calendar mode cannot parse it.
    fn prompt_bound<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        label: &str,
        field: &'static str,
    ) -> Result<String> {
        let filter = self.date_filter;
        console.prompt_parsed(label, field, |raw| match filter {
            DateFilter::Calendar => parse_bound(raw, field).map(|_| raw.to_string()),
            DateFilter::Lexicographic => Ok(raw.to_string()),
        })
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.store.is_empty() {
            return console.say("No finance records found.");
        }
        for r in self.store.records() {
            console.say(format!(
                "{}. {} ({}, {}, {})",
                r.id, r.amount, r.category, r.date, r.description
            ))?;
        }
        Ok(())
    }
}

fn parse_bound(value: &str, field: &'static str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AssistantError::InvalidInput {
            field,
            value: value.to_string(),
        }
    })
}

impl Menu for FinanceController {
    const TITLE: &'static str = "Finance";
    const ITEMS: &'static [&'static str] = &[
        "Add a record",
        "List records",
        "Generate a report",
        "Import records from CSV",
        "Export records to CSV",
    ];

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match choice {
            1 => {
                let amount = console.prompt_parsed(
                    "Enter amount (positive for income, negative for expense): ",
                    "amount",
                    parse_amount,
                )?;
                let category = console.prompt("Enter category: ")?;
                let date = console.prompt("Enter date (DD-MM-YYYY): ")?;
                let description = console.prompt("Enter description: ")?;
                let id = self.add(amount, category, date, description)?.id;
                console.say(format!("Finance record {} added.", id))
            }
            2 => self.list(console),
            3 => {
                let start =
                    self.prompt_bound(console, "Enter start date (DD-MM-YYYY): ", "start date")?;
                let end =
                    self.prompt_bound(console, "Enter end date (DD-MM-YYYY): ", "end date")?;
                let report = self.report(&start, &end)?;
                console.say(report)
            }
            4 => import_records(&mut self.store, console),
            5 => export_records(&self.store, console),
            _ => unreachable!("menu choice out of range: {}", choice),
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save()
    }
}
