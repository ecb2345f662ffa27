//! Data models for garments-ledger
//!
//! Wire-compatible representations of what the Garments ERP API sends and
//! accepts (camelCase JSON), plus the domain types the reports are built from.

pub mod auth;
pub mod cashbook;
pub mod category;
pub mod contact;
pub mod currency;
pub mod date_range;
pub mod dates;
pub mod journal;
pub mod money;
pub mod report_template;
pub mod tax_rate;
pub mod trial_balance;
pub mod warehouse;

pub use auth::{LoginRequest, LoginResponse, UserInfo};
pub use cashbook::{
    CashBookEntry, CashBookSaveResponse, CreditTransaction, DebitTransaction, LookupItem,
    SavedTransaction, SingleTransactionRequest, TransactionSaveResponse,
};
pub use category::{
    Category, CategoryType, CategoryValidationError, CreateCategoryRequest, UpdateCategoryRequest,
};
pub use contact::{Contact, ContactRequest, ContactType};
pub use currency::{Currency, CurrencyRequest};
pub use date_range::{DateRange, DateRangeError, MAX_RANGE_DAYS};
pub use journal::{
    EntryType, JournalEntry, JournalEntryFilters, JournalEntryPage, JournalExportFormat,
    JournalExportRequest, JournalExportResponse, PaginationInfo, SummaryInfo,
    TransactionTypeFilter,
};
pub use money::Money;
pub use report_template::{ReportTemplate, ReportTemplateRequest};
pub use tax_rate::{TaxRate, TaxRateRequest};
pub use trial_balance::{
    AccountBalance, AccountCategory, AccountCategoryType, AccountTransactions, AccountVariance,
    TransactionDetail, TrialBalanceComparison, TrialBalanceData,
};
pub use warehouse::{Warehouse, WarehouseRequest};
