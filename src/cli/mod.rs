//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod cashbook;
pub mod category;
pub mod contact;
pub mod journal;
pub mod master_data;
pub mod trial_balance;

use std::time::Duration;

use chrono::NaiveDate;

use crate::api::{ApiClient, RateLimiter, RetryPolicy};
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

pub use auth::{handle_auth_command, handle_health_command, AuthCommands};
pub use cashbook::{handle_cashbook_command, CashBookCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use contact::{handle_contact_command, ContactCommands};
pub use journal::{handle_journal_command, JournalCommands};
pub use master_data::{
    handle_currency_command, handle_tax_rate_command, handle_template_command,
    handle_warehouse_command, CurrencyCommands, TaxRateCommands, TemplateCommands,
    WarehouseCommands,
};
pub use trial_balance::{handle_trial_balance_command, TrialBalanceCommands};

/// Everything a command handler needs
pub struct AppContext {
    pub paths: LedgerPaths,
    pub settings: Settings,
    pub client: ApiClient,
    pub limiter: RateLimiter,
}

impl AppContext {
    pub fn new(paths: LedgerPaths, settings: Settings) -> LedgerResult<Self> {
        let client = ApiClient::from_settings(&settings, &paths)?;
        let limiter = RateLimiter::from_settings(&settings.rate_limit);
        Ok(Self {
            paths,
            settings,
            client,
            limiter,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from_settings(&self.settings.retry)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.settings.cache_ttl_secs)
    }
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_date(value: &str, label: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid {} '{}', expected YYYY-MM-DD", label, value))
    })
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today
pub fn parse_date_or_today(value: Option<&str>, label: &str) -> LedgerResult<NaiveDate> {
    match value {
        Some(v) => parse_date(v, label),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Parse an amount argument that must be greater than zero
pub fn parse_positive_amount(value: &str) -> LedgerResult<Money> {
    let amount = Money::parse(value)
        .map_err(|e| LedgerError::Validation(format!("Invalid amount '{}': {}", value, e)))?;
    if !amount.is_positive() {
        return Err(LedgerError::Validation("Amount must be greater than zero".into()));
    }
    Ok(amount)
}
