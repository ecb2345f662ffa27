//! Access to the Garments ERP REST API
//!
//! - `transport`: the HTTP seam (reqwest in production)
//! - `client`: token handling, JSON and status normalization
//! - `retry`, `rate_limit`, `cache`, `partial`: the wrappers services put
//!   around client calls

pub mod cache;
pub mod client;
pub mod partial;
pub mod rate_limit;
pub mod retry;
pub mod token;
pub mod transport;

pub use cache::ResponseCache;
pub use client::ApiClient;
pub use partial::{handle_partial_failure, PartialResults};
pub use rate_limit::RateLimiter;
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use token::TokenStore;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, Transport};
