//! Cash book entries and single transactions
//!
//! A cash book entry groups the credit (money in) and debit (money out)
//! lines recorded under one reference number.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{api_date, api_datetime};
use super::journal::EntryType;
use super::money::Money;
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditTransaction {
    #[serde(with = "api_date")]
    pub date: NaiveDate,
    pub category_name: String,
    pub particulars: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebitTransaction {
    #[serde(with = "api_date")]
    pub date: NaiveDate,
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub buyer_name: Option<String>,
    pub particulars: String,
    pub amount: Money,
}

fn validate_line(side: &str, category: &str, particulars: &str, amount: Money) -> Result<(), LedgerError> {
    if category.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} category is required", side)));
    }
    if particulars.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} particulars are required", side)));
    }
    if !amount.is_positive() {
        return Err(LedgerError::Validation(format!(
            "{} amount must be greater than zero",
            side
        )));
    }
    Ok(())
}

impl CreditTransaction {
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_line("Credit", &self.category_name, &self.particulars, self.amount)
    }
}

impl DebitTransaction {
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_line("Debit", &self.category_name, &self.particulars, self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashBookEntry {
    #[serde(with = "api_date")]
    pub transaction_date: NaiveDate,
    pub reference_number: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub credit_transactions: Vec<CreditTransaction>,
    #[serde(default)]
    pub debit_transactions: Vec<DebitTransaction>,
}

impl CashBookEntry {
    pub fn new(transaction_date: NaiveDate, reference_number: impl Into<String>) -> Self {
        Self {
            transaction_date,
            reference_number: reference_number.into(),
            description: String::new(),
            credit_transactions: Vec::new(),
            debit_transactions: Vec::new(),
        }
    }

    pub fn total_credits(&self) -> Money {
        self.credit_transactions.iter().map(|t| t.amount).sum()
    }

    pub fn total_debits(&self) -> Money {
        self.debit_transactions.iter().map(|t| t.amount).sum()
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.reference_number.trim().is_empty() {
            return Err(LedgerError::Validation("Reference number is required".into()));
        }
        if self.credit_transactions.is_empty() && self.debit_transactions.is_empty() {
            return Err(LedgerError::Validation(
                "A cash book entry needs at least one credit or debit transaction".into(),
            ));
        }
        for credit in &self.credit_transactions {
            credit.validate()?;
        }
        for debit in &self.debit_transactions {
            debit.validate()?;
        }
        Ok(())
    }
}

/// Result of `create-entry`; failures are reported here rather than as errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashBookSaveResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub journal_entry_id: Option<String>,
    #[serde(default)]
    pub accounts_created: Option<u32>,
    #[serde(default)]
    pub contacts_created: Option<u32>,
    #[serde(default)]
    pub transactions_processed: Option<u32>,
}

impl CashBookSaveResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            journal_entry_id: None,
            accounts_created: None,
            contacts_created: None,
            transactions_processed: None,
        }
    }
}

/// Body of `credit-transaction` / `debit-transaction`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleTransactionRequest {
    #[serde(with = "api_date")]
    pub date: NaiveDate,
    pub category_name: String,
    pub particulars: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    pub reference_number: String,
}

impl SingleTransactionRequest {
    pub fn credit(tx: &CreditTransaction, reference_number: String) -> Self {
        Self {
            date: tx.date,
            category_name: tx.category_name.clone(),
            particulars: tx.particulars.clone(),
            amount: tx.amount,
            contact_name: tx.contact_name.clone(),
            supplier_name: None,
            buyer_name: None,
            reference_number,
        }
    }

    pub fn debit(tx: &DebitTransaction, reference_number: String) -> Self {
        Self {
            date: tx.date,
            category_name: tx.category_name.clone(),
            particulars: tx.particulars.clone(),
            amount: tx.amount,
            contact_name: None,
            supplier_name: tx.supplier_name.clone(),
            buyer_name: tx.buyer_name.clone(),
            reference_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSaveResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub journal_entry_id: Option<String>,
}

impl TransactionSaveResponse {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            transaction_id: None,
            journal_entry_id: None,
        }
    }
}

/// A row of `recent-transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTransaction {
    pub id: String,
    #[serde(with = "api_date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category_name: String,
    #[serde(default)]
    pub particulars: String,
    pub amount: Money,
    #[serde(default)]
    pub reference_number: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Minimal shape shared by the cash book category and contact lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupItem {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<serde_json::Value>,
}
