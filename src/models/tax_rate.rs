//! Tax rates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{api_datetime, api_datetime_opt};
use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRate {
    pub id: String,
    pub tax_name: String,
    pub tax_percentage: f64,
    #[serde(default)]
    pub tax_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(with = "api_datetime")]
    pub effective_from: DateTime<Utc>,
    #[serde(default, with = "api_datetime_opt")]
    pub effective_to: Option<DateTime<Utc>>,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
}

impl TaxRate {
    /// Whether the rate applies at `at`
    pub fn is_effective(&self, at: DateTime<Utc>) -> bool {
        self.is_active
            && self.effective_from <= at
            && self.effective_to.map_or(true, |end| at <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRateRequest {
    pub tax_name: String,
    pub tax_percentage: f64,
    pub tax_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(with = "api_datetime")]
    pub effective_from: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", with = "api_datetime_opt")]
    pub effective_to: Option<DateTime<Utc>>,
}

impl TaxRateRequest {
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.tax_name.trim().is_empty() {
            return Err(LedgerError::Validation("Tax name is required".into()));
        }
        if !(0.0..=100.0).contains(&self.tax_percentage) {
            return Err(LedgerError::Validation(format!(
                "Tax percentage must be between 0 and 100, got {}",
                self.tax_percentage
            )));
        }
        if let Some(end) = self.effective_to {
            if end < self.effective_from {
                return Err(LedgerError::Validation(
                    "Effective-to date must not be before effective-from date".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn vat() -> TaxRateRequest {
        TaxRateRequest {
            tax_name: "VAT".into(),
            tax_percentage: 15.0,
            tax_type: "VAT".into(),
            description: None,
            is_active: true,
            effective_from: Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
            effective_to: None,
        }
    }

    #[test]
    fn test_validation() {
        assert!(vat().validate().is_ok());

        let mut req = vat();
        req.tax_percentage = 120.0;
        assert!(req.validate().is_err());

        let mut req = vat();
        req.effective_to = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_request_omits_open_end() {
        let json = serde_json::to_value(vat()).unwrap();
        assert!(json.get("effectiveTo").is_none());
        assert_eq!(json["taxPercentage"], 15.0);
    }

    #[test]
    fn test_is_effective() {
        let json = r#"{
            "id": "t1", "taxName": "VAT", "taxPercentage": 15, "taxType": "VAT",
            "isActive": true, "effectiveFrom": "2024-07-01T00:00:00",
            "effectiveTo": "2025-06-30T00:00:00", "createdAt": "2024-06-01T00:00:00"
        }"#;
        let rate: TaxRate = serde_json::from_str(json).unwrap();
        assert!(rate.is_effective(Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()));
        assert!(!rate.is_effective(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()));
    }
}
