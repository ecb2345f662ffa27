//! Warehouses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{api_datetime, api_datetime_opt};
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: String,
    pub warehouse_name: String,
    pub warehouse_code: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "api_datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body for both create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub warehouse_name: String,
    pub warehouse_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WarehouseRequest {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            warehouse_name: name.into(),
            warehouse_code: code.into(),
            address: None,
            city: None,
            country: None,
            phone: None,
            email: None,
            manager_name: None,
            is_active: true,
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.warehouse_name.trim().is_empty() {
            return Err(LedgerError::Validation("Warehouse name is required".into()));
        }
        if self.warehouse_code.trim().is_empty() {
            return Err(LedgerError::Validation("Warehouse code is required".into()));
        }
        Ok(())
    }
}
