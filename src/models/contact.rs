//! Customers and suppliers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::category::IndexOrName;
use super::dates::{api_datetime, api_datetime_opt};
use super::money::Money;
use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactType {
    Customer,
    Supplier,
    Both,
}

impl ContactType {
    fn index(&self) -> u8 {
        match self {
            Self::Customer => 0,
            Self::Supplier => 1,
            Self::Both => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Supplier => "Supplier",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" | "buyer" | "0" => Ok(Self::Customer),
            "supplier" | "1" => Ok(Self::Supplier),
            "both" | "2" => Ok(Self::Both),
            other => Err(LedgerError::Validation(format!(
                "Unknown contact type '{}'. Expected Customer, Supplier or Both",
                other
            ))),
        }
    }
}

impl Serialize for ContactType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for ContactType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match IndexOrName::deserialize(deserializer)? {
            IndexOrName::Index(i) => i.to_string().parse().map_err(serde::de::Error::custom),
            IndexOrName::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub company_name: String,
    pub contact_type: ContactType,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub tax_number: Option<String>,
    #[serde(default)]
    pub credit_limit: Money,
    #[serde(default)]
    pub payment_terms: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub outstanding_balance: Money,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "api_datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub company_name: String,
    pub contact_type: ContactType,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    pub credit_limit: Money,
    pub payment_terms: u32,
}

impl ContactRequest {
    pub fn new(name: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            name: name.into(),
            company_name: String::new(),
            contact_type,
            email: String::new(),
            phone: None,
            mobile: None,
            website: None,
            tax_number: None,
            credit_limit: Money::zero(),
            payment_terms: 30,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Validation("Contact name is required".into()));
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(LedgerError::Validation(format!(
                "'{}' is not a valid email address",
                self.email
            )));
        }
        if self.credit_limit.is_negative() {
            return Err(LedgerError::Validation(
                "Credit limit cannot be negative".into(),
            ));
        }
        Ok(())
    }
}
