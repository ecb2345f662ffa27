//! Cash book CSV import
//!
//! Reads the two-sided cash book sheet kept by the accounts office: money in
//! on the left, money out on the right, one row per day's line.
//!
//! ```text
//! Date,Catagories,Particulars,Amount,Date,Catagories,Supplier,Buyer,Particulars,Amount
//! 01-02-2025,Loan A/C Chairman,,"261,080",01-02-25,Subcontract bill,,Brooklyn: Joggers,,"2,400"
//! ```
//!
//! Title rows above the column header are skipped. Every row with a date and
//! a positive amount on either side becomes one cash book entry.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{CashBookEntry, CreditTransaction, DebitTransaction, Money};
use crate::services::CashBookService;

pub const COLUMN_COUNT: usize = 10;
const CREDIT_DATE_FORMAT: &str = "%d-%m-%Y";
const DEBIT_DATE_FORMAT: &str = "%d-%m-%y";
const FALLBACK_DATA_START: usize = 3;

mod col {
    pub const CREDIT_DATE: usize = 0;
    pub const CREDIT_CATEGORY: usize = 1;
    pub const CREDIT_PARTICULARS: usize = 2;
    pub const CREDIT_AMOUNT: usize = 3;
    pub const DEBIT_DATE: usize = 4;
    pub const DEBIT_CATEGORY: usize = 5;
    pub const SUPPLIER: usize = 6;
    pub const BUYER: usize = 7;
    pub const DEBIT_PARTICULARS: usize = 8;
    pub const DEBIT_AMOUNT: usize = 9;
}

/// A data row turned into an entry, with its 1-based line in the file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub line: usize,
    pub entry: CashBookEntry,
}

/// Everything read from a file, before anything is sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    pub rows: Vec<ParsedRow>,
    /// Rows that could not be parsed, by line number
    pub errors: BTreeMap<usize, String>,
    /// Data rows with nothing to import on either side
    pub skipped: usize,
}

impl ImportPreview {
    pub fn total_credits(&self) -> Money {
        self.rows.iter().map(|r| r.entry.total_credits()).sum()
    }

    pub fn total_debits(&self) -> Money {
        self.rows.iter().map(|r| r.entry.total_debits()).sum()
    }
}

/// Outcome of saving a preview
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportResult {
    pub imported: usize,
    pub failed: usize,
    pub journal_entry_ids: Vec<String>,
    pub error_messages: BTreeMap<usize, String>,
}

pub struct CashBookImportService<'a> {
    cashbook: CashBookService<'a>,
}

impl<'a> CashBookImportService<'a> {
    pub fn new(cashbook: CashBookService<'a>) -> Self {
        Self { cashbook }
    }

    pub fn parse_file(&self, path: &Path) -> LedgerResult<ImportPreview> {
        let file = File::open(path).map_err(|e| {
            LedgerError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        parse_cash_book(file)
    }

    /// Save each parsed entry in order; a failed row does not stop the rest
    pub fn import(&self, preview: &ImportPreview) -> ImportResult {
        let mut result = ImportResult::default();

        for row in &preview.rows {
            match self.cashbook.save_entry(&row.entry) {
                Ok(response) if response.success => {
                    result.imported += 1;
                    if let Some(id) = response.journal_entry_id {
                        result.journal_entry_ids.push(id);
                    }
                }
                Ok(response) => {
                    result.failed += 1;
                    result.error_messages.insert(row.line, response.message);
                }
                Err(e) => {
                    result.failed += 1;
                    result.error_messages.insert(row.line, e.to_string());
                }
            }
        }

        info!(
            imported = result.imported,
            failed = result.failed,
            "cash book import finished"
        );
        result
    }
}

/// Parse a cash book sheet from any reader
pub fn parse_cash_book<R: Read>(reader: R) -> LedgerResult<ImportPreview> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            LedgerError::Import(format!("Error reading CSV record on line {}: {}", idx + 1, e))
        })?;
        records.push(record);
    }

    let start = find_data_start(&records);
    debug!(start, rows = records.len(), "parsing cash book sheet");

    let mut preview = ImportPreview::default();
    for (idx, record) in records.iter().enumerate().skip(start) {
        let line = idx + 1;
        if record.iter().all(str::is_empty) {
            continue;
        }
        match parse_row(record, line) {
            Ok(Some(entry)) => preview.rows.push(ParsedRow { line, entry }),
            Ok(None) => preview.skipped += 1,
            Err(message) => {
                warn!(line, %message, "skipping unreadable cash book row");
                preview.errors.insert(line, message);
            }
        }
    }

    Ok(preview)
}

/// Index of the first data row: just after the column header, or row 3
fn find_data_start(records: &[StringRecord]) -> usize {
    records
        .iter()
        .position(|r| {
            let has = |label: &str| r.iter().any(|f| f.contains(label));
            has("Date") && has("Catagories") && has("Amount")
        })
        .map_or(FALLBACK_DATA_START, |i| i + 1)
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("").trim()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_row(record: &StringRecord, line: usize) -> Result<Option<CashBookEntry>, String> {
    if record.len() < COLUMN_COUNT {
        return Err(format!(
            "Expected {} columns, found {}",
            COLUMN_COUNT,
            record.len()
        ));
    }

    let credit = parse_credit_side(record)?;
    let debit = parse_debit_side(record)?;

    let Some(date) = credit
        .as_ref()
        .map(|c| c.date)
        .or_else(|| debit.as_ref().map(|d| d.date))
    else {
        return Ok(None);
    };

    let reference = format!("IMP-{}-{}", date.format("%Y%m%d"), line);
    let mut entry = CashBookEntry::new(date, reference);
    entry.description = credit
        .iter()
        .map(|c| c.particulars.as_str())
        .chain(debit.iter().map(|d| d.particulars.as_str()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");
    entry.credit_transactions.extend(credit);
    entry.debit_transactions.extend(debit);

    entry.validate().map_err(|e| e.to_string())?;
    Ok(Some(entry))
}

fn parse_credit_side(record: &StringRecord) -> Result<Option<CreditTransaction>, String> {
    let date = field(record, col::CREDIT_DATE);
    let amount = field(record, col::CREDIT_AMOUNT);
    if date.is_empty() || amount.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(date, CREDIT_DATE_FORMAT)
        .map_err(|_| format!("Invalid credit date '{}', expected dd-MM-yyyy", date))?;
    let amount = parse_amount(amount)?;
    if !amount.is_positive() {
        return Ok(None);
    }

    let category = field(record, col::CREDIT_CATEGORY);
    let particulars = field(record, col::CREDIT_PARTICULARS);
    Ok(Some(CreditTransaction {
        date,
        category_name: category.to_string(),
        particulars: if particulars.is_empty() { category } else { particulars }.to_string(),
        amount,
        contact_name: None,
    }))
}

fn parse_debit_side(record: &StringRecord) -> Result<Option<DebitTransaction>, String> {
    let date = field(record, col::DEBIT_DATE);
    let amount = field(record, col::DEBIT_AMOUNT);
    if date.is_empty() || amount.is_empty() {
        return Ok(None);
    }

    let date = parse_short_date(date)?;
    let amount = parse_amount(amount)?;
    if !amount.is_positive() {
        return Ok(None);
    }

    let category = field(record, col::DEBIT_CATEGORY);
    let supplier = non_empty(field(record, col::SUPPLIER));
    let buyer = non_empty(field(record, col::BUYER));
    let particulars = match field(record, col::DEBIT_PARTICULARS) {
        "" => buyer.as_deref().or(supplier.as_deref()).unwrap_or(category),
        p => p,
    }
    .to_string();

    Ok(Some(DebitTransaction {
        date,
        category_name: category.to_string(),
        supplier_name: supplier,
        buyer_name: buyer,
        particulars,
        amount,
    }))
}

/// `dd-MM-yy`, always in this century
fn parse_short_date(value: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(value, DEBIT_DATE_FORMAT)
        .map_err(|_| format!("Invalid debit date '{}', expected dd-MM-yy", value))?;
    if date.year() < 2000 {
        return date
            .with_year(date.year() + 100)
            .ok_or_else(|| format!("Invalid debit date '{}'", value));
    }
    Ok(date)
}

fn parse_amount(value: &str) -> Result<Money, String> {
    let cleaned: String = value.chars().filter(|c| *c != ',' && *c != '"').collect();
    Money::parse(&cleaned).map_err(|_| format!("Invalid amount '{}'", value))
}
