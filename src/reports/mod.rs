//! Reports module for garments-ledger
//!
//! Terminal renderings of the trial balance, its period comparison, the
//! multi-period summary and the per-account drill-down.

pub mod account_transactions;
pub mod comparison;
pub mod periods;
pub mod trial_balance;

pub use account_transactions::{AccountTransactionsReport, BalanceMismatch};
pub use comparison::ComparisonReport;
pub use periods::PeriodSummaryReport;
pub use trial_balance::{BreakdownLine, TrialBalanceReport};
