//! Service layer for garments-ledger
//!
//! Services sit on top of the API client. They validate input before a
//! request goes out, shape query strings and bodies, and apply the retry,
//! rate limit and cache wrappers each endpoint needs.

pub mod auth;
pub mod calculation;
pub mod cashbook;
pub mod category;
pub mod contact;
pub mod crud;
pub mod currency;
pub mod health;
pub mod import;
pub mod journal;
pub mod report_template;
pub mod tax_rate;
pub mod transaction;
pub mod trial_balance;
pub mod warehouse;

pub use auth::AuthService;
pub use cashbook::CashBookService;
pub use category::CategoryService;
pub use contact::ContactService;
pub use crud::{Resource, Validate};
pub use currency::CurrencyService;
pub use health::{HealthService, HealthStatus};
pub use import::{CashBookImportService, ImportPreview, ImportResult};
pub use journal::JournalEntryService;
pub use report_template::ReportTemplateService;
pub use tax_rate::TaxRateService;
pub use transaction::TransactionService;
pub use trial_balance::{Pagination, TrialBalanceOptions, TrialBalanceService};
pub use warehouse::WarehouseService;
