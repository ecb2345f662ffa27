//! garments-ledger - Accounting client for the Garments ERP API
//!
//! This library backs the `gledger` binary. It wraps the ERP's REST API in
//! typed services and builds the trial balance reports accountants need on
//! top of it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `api`: HTTP client, token store, retry, rate limiting and caching
//! - `models`: Wire models and domain types (money, date ranges, balances)
//! - `services`: Validation and request shaping per API area
//! - `reports`: Trial balance, comparison and drill-down reports
//! - `export`: CSV, PDF, JSON and YAML writers
//! - `display`: Terminal tables for the CLI
//! - `cli`: clap command definitions and handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use garments_ledger::config::{paths::LedgerPaths, settings::Settings};
//! use garments_ledger::api::ApiClient;
//! use garments_ledger::services::{TrialBalanceOptions, TrialBalanceService};
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let client = ApiClient::from_settings(&settings, &paths)?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::LedgerError;
