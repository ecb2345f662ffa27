//! Tax rate service

use chrono::{DateTime, Utc};

use super::crud::{Resource, Validate};
use crate::api::ApiClient;
use crate::error::LedgerResult;
use crate::models::{TaxRate, TaxRateRequest};

impl Validate for TaxRateRequest {
    fn validate(&self) -> LedgerResult<()> {
        TaxRateRequest::validate(self)
    }
}

pub struct TaxRateService<'a> {
    resource: Resource<'a, TaxRate, TaxRateRequest>,
}

impl<'a> TaxRateService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            resource: Resource::new(client, "/api/taxrate", "Tax rate"),
        }
    }

    pub fn list(&self) -> LedgerResult<Vec<TaxRate>> {
        self.resource.list()
    }

    pub fn list_active(&self) -> LedgerResult<Vec<TaxRate>> {
        self.resource.list_active()
    }

    /// Active rates whose effective window contains `at`
    pub fn effective_at(&self, at: DateTime<Utc>) -> LedgerResult<Vec<TaxRate>> {
        Ok(self
            .list_active()?
            .into_iter()
            .filter(|r| r.is_effective(at))
            .collect())
    }

    pub fn get(&self, id: &str) -> LedgerResult<TaxRate> {
        self.resource.get(id)
    }

    pub fn create(&self, request: &TaxRateRequest) -> LedgerResult<TaxRate> {
        self.resource.create(request)
    }

    pub fn update(&self, id: &str, request: &TaxRateRequest) -> LedgerResult<TaxRate> {
        self.resource.update(id, request)
    }

    pub fn delete(&self, id: &str) -> LedgerResult<()> {
        self.resource.delete(id)
    }
}
