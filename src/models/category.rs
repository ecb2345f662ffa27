//! Ledger categories
//!
//! Categories classify cash book lines as money in (credit) or money out
//! (debit). The backend sends the type as a number (`0` / `1`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::dates::{api_datetime, api_datetime_opt};
use crate::error::LedgerError;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Backend enums arrive either as their index or their name
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum IndexOrName {
    Index(u64),
    Name(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryType {
    Credit,
    Debit,
}

impl CategoryType {
    pub fn index(&self) -> u8 {
        match self {
            Self::Credit => 0,
            Self::Debit => 1,
        }
    }

    pub fn from_index(index: u64) -> Option<Self> {
        match index {
            0 => Some(Self::Credit),
            1 => Some(Self::Debit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "credit" | "0" => Ok(Self::Credit),
            "debit" | "1" => Ok(Self::Debit),
            _ => Err(LedgerError::Validation(
                "Invalid category type. Must be Credit or Debit".into(),
            )),
        }
    }
}

impl Serialize for CategoryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for CategoryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match IndexOrName::deserialize(deserializer)? {
            IndexOrName::Index(i) => Self::from_index(i)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid category type {}", i))),
            IndexOrName::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    #[serde(default)]
    pub type_name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "api_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "api_datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub usage_count: u32,
}

fn default_true() -> bool {
    true
}

impl Category {
    /// Case-insensitive match against name or description
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}

impl CreateCategoryRequest {
    /// Validate and trim; a blank description is dropped
    pub fn normalized(self) -> Result<Self, CategoryValidationError> {
        let (name, description) = normalize_fields(&self.name, self.description.as_deref())?;
        Ok(Self {
            name,
            description,
            category_type: self.category_type,
        })
    }
}

impl UpdateCategoryRequest {
    pub fn normalized(self) -> Result<Self, CategoryValidationError> {
        let (name, description) = normalize_fields(&self.name, self.description.as_deref())?;
        Ok(Self {
            name,
            description,
            is_active: self.is_active,
        })
    }
}

fn normalize_fields(
    name: &str,
    description: Option<&str>,
) -> Result<(String, Option<String>), CategoryValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }

    let description = description.map(str::trim).filter(|d| !d.is_empty());
    if let Some(d) = description {
        let len = d.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(CategoryValidationError::DescriptionTooLong(len));
        }
    }

    Ok((name.to_string(), description.map(str::to_string)))
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    DescriptionTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name is required and cannot be empty"),
            Self::NameTooLong(_) => write!(
                f,
                "Category name cannot exceed {} characters",
                MAX_NAME_LEN
            ),
            Self::DescriptionTooLong(_) => write!(
                f,
                "Category description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

impl From<CategoryValidationError> for LedgerError {
    fn from(err: CategoryValidationError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}
