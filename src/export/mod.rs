//! Export module for garments-ledger
//!
//! - CSV: trial balance and account drill-down reports (spreadsheet-compatible)
//! - PDF: the printable trial balance
//! - JSON / YAML: raw dumps of any fetched report

pub mod csv;
pub mod json;
pub mod pdf;
pub mod yaml;

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::info;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{DateRange, TrialBalanceData};

pub use self::csv::{write_account_transactions_csv, write_trial_balance_csv};
pub use json::write_json;
pub use pdf::{build_trial_balance_layout, render_pdf, PdfLayout};
pub use yaml::write_yaml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(LedgerError::Validation(format!(
                "Unsupported export format: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub include_calculation_details: bool,
    pub include_zero_balances: bool,
}

/// Company lines printed above every exported report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub company_name: String,
    pub department: String,
}

impl ReportHeader {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            company_name: settings.company_name.clone(),
            department: settings.company_department.clone(),
        }
    }
}

impl Default for ReportHeader {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// `trial-balance_{start}_to_{end}_{today}.{ext}`
pub fn trial_balance_filename(range: &DateRange, format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "trial-balance_{}_to_{}_{}.{}",
        range.start_date.format("%Y-%m-%d"),
        range.end_date.format("%Y-%m-%d"),
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

/// `account-transactions_{name}_{start}_to_{end}_{today}.csv`
pub fn account_transactions_filename(account_name: &str, range: &DateRange, today: NaiveDate) -> String {
    format!(
        "account-transactions_{}_{}_to_{}_{}.csv",
        sanitize_filename_part(account_name),
        range.start_date.format("%Y-%m-%d"),
        range.end_date.format("%Y-%m-%d"),
        today.format("%Y-%m-%d")
    )
}

/// Replace everything outside `[A-Za-z0-9]` with `_`
pub fn sanitize_filename_part(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Write a trial balance report to `path` in the given format
pub fn export_trial_balance(
    data: &TrialBalanceData,
    format: ExportFormat,
    options: ExportOptions,
    header: &ReportHeader,
    path: &Path,
) -> LedgerResult<()> {
    let result = match format {
        ExportFormat::Csv => File::create(path)
            .map_err(LedgerError::from)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                write_trial_balance_csv(data, header, options, &mut writer)?;
                writer.flush().map_err(LedgerError::from)
            }),
        ExportFormat::Pdf => {
            let layout = build_trial_balance_layout(data, header, options);
            render_pdf(&layout, "Trial Balance Report")
                .and_then(|bytes| std::fs::write(path, bytes).map_err(LedgerError::from))
        }
    };

    result.map_err(|e| {
        LedgerError::Export(format!(
            "Failed to export trial balance as {}: {}",
            format,
            inner_message(&e)
        ))
    })?;

    info!(path = %path.display(), %format, "trial balance exported");
    Ok(())
}

/// Message without the variant prefix
fn inner_message(err: &LedgerError) -> String {
    match err {
        LedgerError::Export(m) | LedgerError::Io(m) => m.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn export_err(e: std::io::Error) -> LedgerError {
    LedgerError::Export(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            trial_balance_filename(&range(), ExportFormat::Pdf, today()),
            "trial-balance_2024-01-01_to_2024-01-31_2024-02-03.pdf"
        );
        assert_eq!(
            account_transactions_filename("Cash & Bank (Main)", &range(), today()),
            "account-transactions_Cash___Bank__Main__2024-01-01_to_2024-01-31_2024-02-03.csv"
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        let err = "xlsx".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Unsupported export format: xlsx");
    }

    #[test]
    fn test_export_csv_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tb.csv");
        let data = TrialBalanceData::placeholder(range());

        export_trial_balance(
            &data,
            ExportFormat::Csv,
            ExportOptions::default(),
            &ReportHeader::default(),
            &path,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("\"Garments ERP System\""));
    }

    #[test]
    fn test_export_failure_names_the_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("tb.csv");
        let data = TrialBalanceData::placeholder(range());

        let err = export_trial_balance(
            &data,
            ExportFormat::Csv,
            ExportOptions::default(),
            &ReportHeader::default(),
            &path,
        )
        .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Export error: Failed to export trial balance as CSV: "));
    }
}
