//! Category service
//!
//! Credit (money in) and debit (money out) categories used on cash book
//! lines. With development fallback enabled, reads that fail because the
//! API is unreachable or rejects the token are answered from a built-in
//! dataset instead.

use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use super::crud::path_id;
use crate::api::ApiClient;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryType, CreateCategoryRequest, UpdateCategoryRequest};

const BASE_PATH: &str = "/api/category";

/// Service for category management
pub struct CategoryService<'a> {
    client: &'a ApiClient,
    dev_fallback: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UniqueResponse {
    #[serde(default)]
    is_unique: bool,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    #[serde(default)]
    count: u32,
}

impl<'a> CategoryService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            dev_fallback: false,
        }
    }

    pub fn with_dev_fallback(mut self, enabled: bool) -> Self {
        self.dev_fallback = enabled;
        self
    }

    /// List all categories
    pub fn get_all(&self) -> LedgerResult<Vec<Category>> {
        let result = self.client.get(BASE_PATH, Vec::new());
        self.or_mock(result, "list categories", |_| true)
    }

    pub fn get_by_id(&self, id: &str) -> LedgerResult<Category> {
        let id = require_id(id)?;
        let result = self
            .client
            .get::<Category>(&format!("{}/{}", BASE_PATH, id), Vec::new());

        match result {
            Ok(category) => Ok(category),
            Err(e) if self.should_fall_back(&e) => {
                warn!(error = %e, id, "serving category from the development dataset");
                mock_categories()
                    .into_iter()
                    .find(|c| c.id == id)
                    .ok_or_else(|| LedgerError::category_not_found(id))
            }
            Err(e) if e.is_not_found() => Err(LedgerError::category_not_found(id)),
            Err(e) => Err(e),
        }
    }

    pub fn get_by_type(&self, category_type: CategoryType) -> LedgerResult<Vec<Category>> {
        let path = format!("{}/type/{}", BASE_PATH, category_type.index());
        let result = self.client.get(&path, Vec::new());
        self.or_mock(result, "list categories by type", |c| {
            c.category_type == category_type
        })
    }

    /// Search names and descriptions; a blank term returns nothing
    pub fn search(&self, term: &str) -> LedgerResult<Vec<Category>> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let result = self.client.get(
            &format!("{}/search", BASE_PATH),
            vec![("q".into(), term.to_string())],
        );
        self.or_mock(result, "search categories", |c| c.matches(term))
    }

    pub fn create(&self, request: CreateCategoryRequest) -> LedgerResult<Category> {
        let request = request.normalized()?;
        self.client.post(BASE_PATH, &request)
    }

    pub fn update(&self, id: &str, request: UpdateCategoryRequest) -> LedgerResult<Category> {
        let id = require_id(id)?;
        let request = request.normalized()?;
        self.client
            .put(&format!("{}/{}", BASE_PATH, id), &request)
            .map_err(|e| not_found_as_category(e, id))
    }

    pub fn delete(&self, id: &str) -> LedgerResult<()> {
        let id = require_id(id)?;
        self.client
            .delete(&format!("{}/{}", BASE_PATH, id))
            .map_err(|e| not_found_as_category(e, id))
    }

    /// Flip `is_active`; returns the updated category
    pub fn toggle_active(&self, id: &str) -> LedgerResult<Category> {
        let id = require_id(id)?;
        self.client
            .patch(&format!("{}/{}/toggle-status", BASE_PATH, id))
            .map_err(|e| not_found_as_category(e, id))
    }

    /// Whether no other category of this type has the name
    ///
    /// Any failure, including a blank name, answers `false`.
    pub fn is_name_unique(&self, name: &str, category_type: CategoryType, exclude_id: Option<&str>) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let mut query = vec![
            ("name".to_string(), name.to_string()),
            ("type".to_string(), category_type.index().to_string()),
        ];
        if let Some(exclude) = exclude_id.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("excludeId".to_string(), exclude.to_string()));
        }

        match self
            .client
            .get::<Option<UniqueResponse>>(&format!("{}/check-unique", BASE_PATH), query)
        {
            Ok(response) => response.is_some_and(|r| r.is_unique),
            Err(e) => {
                warn!(error = %e, name, "could not check category name uniqueness");
                false
            }
        }
    }

    /// Number of transactions recorded against the category
    pub fn usage_count(&self, id: &str) -> LedgerResult<u32> {
        let id = require_id(id)?;
        let response: Option<CountResponse> = self
            .client
            .get(&format!("{}/{}/usage-count", BASE_PATH, id), Vec::new())
            .map_err(|e| not_found_as_category(e, id))?;
        Ok(response.map_or(0, |r| r.count))
    }

    pub fn get_active(&self) -> LedgerResult<Vec<Category>> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.is_active)
            .collect())
    }

    pub fn get_active_by_type(&self, category_type: CategoryType) -> LedgerResult<Vec<Category>> {
        Ok(self
            .get_by_type(category_type)?
            .into_iter()
            .filter(|c| c.is_active)
            .collect())
    }

    fn should_fall_back(&self, err: &LedgerError) -> bool {
        self.dev_fallback && matches!(err, LedgerError::Network(_) | LedgerError::Unauthorized(_))
    }

    fn or_mock<F>(&self, result: LedgerResult<Vec<Category>>, operation: &str, keep: F) -> LedgerResult<Vec<Category>>
    where
        F: Fn(&Category) -> bool,
    {
        match result {
            Ok(categories) => Ok(categories),
            Err(e) if self.should_fall_back(&e) => {
                warn!(error = %e, operation, "serving categories from the development dataset");
                Ok(mock_categories().into_iter().filter(|c| keep(c)).collect())
            }
            Err(e) => Err(e),
        }
    }
}

fn require_id(id: &str) -> LedgerResult<&str> {
    path_id("Category", id)
}

fn not_found_as_category(err: LedgerError, id: &str) -> LedgerError {
    if err.is_not_found() {
        LedgerError::category_not_found(id)
    } else {
        err
    }
}

/// Development dataset: four credit and five debit categories
pub fn mock_categories() -> Vec<Category> {
    let now = Utc::now();
    let entry = |id: &str, name: &str, description: &str, category_type: CategoryType, usage_count: u32| Category {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        category_type,
        type_name: category_type.as_str().to_string(),
        is_active: true,
        created_at: now,
        updated_at: None,
        created_by: None,
        updated_by: None,
        usage_count,
    };

    vec![
        entry("credit-1", "Sales Revenue", "Income from product sales", CategoryType::Credit, 15),
        entry("credit-2", "Service Income", "Income from services provided", CategoryType::Credit, 8),
        entry("credit-3", "Interest Income", "Interest earned on investments", CategoryType::Credit, 3),
        entry("credit-4", "Customer Payments", "Payments received from customers", CategoryType::Credit, 25),
        entry("debit-1", "Office Supplies", "Stationery and office materials", CategoryType::Debit, 12),
        entry("debit-2", "Raw Materials", "Materials for production", CategoryType::Debit, 20),
        entry("debit-3", "Utilities", "Electricity, water, internet bills", CategoryType::Debit, 6),
        entry("debit-4", "Transportation", "Vehicle fuel and maintenance", CategoryType::Debit, 9),
        entry("debit-5", "Employee Salaries", "Staff wages and salaries", CategoryType::Debit, 18),
    ]
}
