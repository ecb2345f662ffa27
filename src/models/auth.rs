//! Authentication payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{api_datetime, api_datetime_opt};
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.email_or_username.trim().is_empty() {
            return Err(LedgerError::Validation("Email or username is required".into()));
        }
        if self.password.is_empty() {
            return Err(LedgerError::Validation("Password is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, with = "api_datetime_opt")]
    pub expiration: Option<DateTime<Utc>>,
    pub user: UserInfo,
}
