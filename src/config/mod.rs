//! Configuration module for garments-ledger
//!
//! - Config directory resolution
//! - User settings persistence (API location, retry and rate-limit tuning)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{RateLimitSettings, RetrySettings, Settings};
