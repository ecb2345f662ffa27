//! Journal entries as listed by the cash book journal endpoints

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::dates::{api_datetime, format_api_date};
use super::money::Money;
use crate::error::LedgerError;

/// Side of the cash book an entry was posted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    Credit,
    Debit,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credit => write!(f, "Credit"),
            Self::Debit => write!(f, "Debit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    #[serde(default)]
    pub journal_number: String,
    #[serde(with = "api_datetime")]
    pub transaction_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub particulars: String,
    pub amount: Money,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub account_name: String,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Which side(s) of the book a listing covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionTypeFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl FromStr for TransactionTypeFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            other => Err(LedgerError::Validation(format!(
                "Unknown transaction type '{}'. Expected All, Credit or Debit",
                other
            ))),
        }
    }
}

impl TransactionTypeFilter {
    fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Credit => Some("Credit"),
            Self::Debit => Some("Debit"),
        }
    }
}

/// Listing filters; unset fields are omitted from the query string
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub transaction_type: TransactionTypeFilter,
    pub amount_min: Option<Money>,
    pub amount_max: Option<Money>,
    pub category: Option<String>,
    pub reference_number: Option<String>,
    pub contact_name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl JournalEntryFilters {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(LedgerError::Validation(
                    "Date from must not be later than date to".into(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.amount_min, self.amount_max) {
            if min > max {
                return Err(LedgerError::Validation(
                    "Minimum amount must not exceed maximum amount".into(),
                ));
            }
        }
        Ok(())
    }

    /// Every set filter as a query parameter
    pub fn query_params(&self) -> Vec<(String, String)> {
        let mut params = self.statistics_params();
        if let Some(min) = self.amount_min {
            params.push(("amountMin".into(), min.to_string()));
        }
        if let Some(max) = self.amount_max {
            params.push(("amountMax".into(), max.to_string()));
        }
        let text_filters = [
            ("referenceNumber", &self.reference_number),
            ("contactName", &self.contact_name),
            ("description", &self.description),
            ("status", &self.status),
        ];
        for (key, value) in text_filters {
            if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                params.push((key.into(), v.trim().to_string()));
            }
        }
        params
    }

    /// The subset the statistics endpoint understands
    pub fn statistics_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.date_from {
            params.push(("dateFrom".into(), format_api_date(from)));
        }
        if let Some(to) = self.date_to {
            params.push(("dateTo".into(), format_api_date(to)));
        }
        if let Some(t) = self.transaction_type.as_param() {
            params.push(("type".into(), t.into()));
        }
        if let Some(c) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            params.push(("category".into(), c.trim().to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_entries: u64,
    pub page_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryInfo {
    pub total_entries: u64,
    pub total_debits: Money,
    pub total_credits: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryPage {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
    #[serde(default)]
    pub pagination: PaginationInfo,
    #[serde(default)]
    pub summary: SummaryInfo,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalExportFormat {
    Csv,
    Excel,
    Pdf,
}

impl FromStr for JournalExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            "pdf" => Ok(Self::Pdf),
            other => Err(LedgerError::Validation(format!(
                "Unsupported export format '{}'",
                other
            ))),
        }
    }
}

/// Server-side export of a filtered journal listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalExportRequest {
    pub format: JournalExportFormat,
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub filters: serde_json::Map<String, serde_json::Value>,
}

impl JournalExportRequest {
    pub fn new(format: JournalExportFormat, columns: Vec<String>, filters: &JournalEntryFilters) -> Self {
        let filters = filters
            .query_params()
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        Self {
            format,
            columns,
            filters,
        }
    }
}

/// Where the server put the exported file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalExportResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_skip_unset() {
        let filters = JournalEntryFilters {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            transaction_type: TransactionTypeFilter::Debit,
            amount_min: Some(Money::from_units(100)),
            category: Some("  ".into()),
            contact_name: Some("Urbo".into()),
            ..Default::default()
        };
        let params = filters.query_params();
        assert_eq!(
            params,
            vec![
                ("dateFrom".to_string(), "2024-01-01".to_string()),
                ("type".to_string(), "Debit".to_string()),
                ("amountMin".to_string(), "100.00".to_string()),
                ("contactName".to_string(), "Urbo".to_string()),
            ]
        );
    }

    #[test]
    fn test_all_type_is_not_sent() {
        let params = JournalEntryFilters::default().statistics_params();
        assert!(params.is_empty());
    }

    #[test]
    fn test_filter_validation() {
        let filters = JournalEntryFilters {
            amount_min: Some(Money::from_units(500)),
            amount_max: Some(Money::from_units(100)),
            ..Default::default()
        };
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_page_deserialize() {
        let json = r#"{
            "success": true,
            "entries": [{
                "id": "j1", "journalNumber": "JE-0001",
                "transactionDate": "2024-01-10T00:00:00", "type": "Credit",
                "categoryName": "Sales Revenue", "particulars": "Invoice 7",
                "amount": 1500, "referenceNumber": "CR-2024-01-10-123456",
                "accountName": "Cash", "createdAt": "2024-01-10T08:00:00Z"
            }],
            "pagination": {"currentPage": 1, "totalPages": 1, "totalEntries": 1, "pageSize": 20},
            "summary": {"totalEntries": 1, "totalDebits": 0, "totalCredits": 1500, "balance": 1500}
        }"#;
        let page: JournalEntryPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.entries[0].entry_type, EntryType::Credit);
        assert_eq!(page.summary.balance, Money::from_units(1500));
    }

    #[test]
    fn test_export_request_flattens_filters() {
        let filters = JournalEntryFilters {
            transaction_type: TransactionTypeFilter::Credit,
            ..Default::default()
        };
        let req = JournalExportRequest::new(JournalExportFormat::Csv, vec!["amount".into()], &filters);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["format"], "csv");
        assert_eq!(json["type"], "Credit");
    }
}
