//! Saved report layouts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{api_datetime, api_datetime_opt};
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTemplate {
    pub id: String,
    pub template_name: String,
    pub report_type: String,
    #[serde(default)]
    pub template_content: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub parameters: Option<String>,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "api_datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTemplateRequest {
    pub template_name: String,
    pub report_type: String,
    pub template_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub is_system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

impl ReportTemplateRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.template_name.trim().is_empty() {
            return Err(LedgerError::Validation("Template name is required".into()));
        }
        if self.report_type.trim().is_empty() {
            return Err(LedgerError::Validation("Report type is required".into()));
        }
        // Parameters are stored as an opaque JSON string server-side
        if let Some(params) = &self.parameters {
            serde_json::from_str::<serde_json::Value>(params).map_err(|e| {
                LedgerError::Validation(format!("Template parameters are not valid JSON: {}", e))
            })?;
        }
        Ok(())
    }
}
