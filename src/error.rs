//! Error types for garments-ledger
//!
//! One error enum covers the whole client: input validation, rate limiting,
//! transport failures and normalized HTTP responses. Each variant knows its
//! category, severity, whether a retry makes sense, and the message to show
//! a user.

use thiserror::Error;

/// Broad classification of an error, used for user messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Validation,
    Network,
    Authentication,
    Authorization,
    Server,
    Client,
    Data,
}

/// How serious an error is for the current operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// The main error type for garments-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Input rejected before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Client-side rate limit exceeded
    #[error("Rate limit exceeded for '{key}', try again in {retry_after_secs}s")]
    RateLimited { key: String, retry_after_secs: u64 },

    /// No response from the server
    #[error("Network error: {0}")]
    Network(String),

    /// 401 from the API; the stored token has been cleared
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// 403 from the API
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// 5xx from the API
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("HTTP {status} error: {message}")]
    Http { status: u16, message: String },

    /// Too many of a batch of parallel calls failed
    #[error("{failed} of {total} requests failed")]
    PartialFailure { failed: usize, total: usize },

    /// The API answered with something we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl LedgerError {
    /// Normalize a non-success HTTP status into an error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => Self::Validation(if message.is_empty() {
                "Invalid request parameters. Please check your input.".into()
            } else {
                message
            }),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound {
                entity_type: "Resource",
                identifier: message,
            },
            429 => Self::RateLimited {
                key: "server".into(),
                retry_after_secs: 0,
            },
            500..=599 => Self::Server { status, message },
            _ => Self::Http { status, message },
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// HTTP status carried by this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Server { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Only transport failures and 5xx responses are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Network(_) => ErrorCategory::Network,
            Self::Unauthorized(_) => ErrorCategory::Authentication,
            Self::Forbidden(_) => ErrorCategory::Authorization,
            Self::Server { .. } => ErrorCategory::Server,
            Self::Json(_) | Self::InvalidResponse(_) | Self::Import(_) => ErrorCategory::Data,
            Self::RateLimited { .. }
            | Self::NotFound { .. }
            | Self::Http { .. }
            | Self::PartialFailure { .. }
            | Self::Export(_)
            | Self::Config(_)
            | Self::Io(_) => ErrorCategory::Client,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network
            | ErrorCategory::Authentication
            | ErrorCategory::Authorization
            | ErrorCategory::Server => ErrorSeverity::High,
            _ if matches!(self, Self::Config(_) | Self::Io(_)) => ErrorSeverity::Critical,
            _ => ErrorSeverity::Medium,
        }
    }

    /// Message suitable for showing to the person running the command
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::RateLimited { .. } => {
                "Too many requests. Please wait a moment and try again.".into()
            }
            Self::Network(_) => "Unable to connect to the server. Please check your \
                                 connection and try again."
                .into(),
            Self::Unauthorized(_) => {
                "Your session has expired. Please run 'gledger auth login' again.".into()
            }
            Self::Forbidden(_) => "You do not have permission to perform this action.".into(),
            Self::NotFound { .. } => self.to_string(),
            Self::Server { .. } => {
                "The server is experiencing issues. Please try again later.".into()
            }
            Self::Json(_) | Self::InvalidResponse(_) => {
                "There was an issue processing the data returned by the server.".into()
            }
            _ => self.to_string(),
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for garments-ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
