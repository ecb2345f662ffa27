//! Currencies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::api_datetime;
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: String,
    pub currency_code: String,
    pub currency_name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub is_base_currency: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRequest {
    pub currency_code: String,
    pub currency_name: String,
    pub symbol: String,
    pub is_base_currency: bool,
    pub is_active: bool,
}

impl CurrencyRequest {
    /// Codes are upper-cased ISO 4217 style (`BDT`, `USD`)
    pub fn validate(&self) -> Result<(), LedgerError> {
        let code = self.currency_code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(LedgerError::Validation(format!(
                "Currency code '{}' must be three upper-case letters",
                self.currency_code
            )));
        }
        if self.currency_name.trim().is_empty() {
            return Err(LedgerError::Validation("Currency name is required".into()));
        }
        Ok(())
    }
}
